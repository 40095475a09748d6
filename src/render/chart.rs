use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, RgbImage};
use lopdf::{
    content::{Content, Operation},
    dictionary, Object, Stream,
};
use plotters::coord::Shift;
use plotters::element::Pie;
use plotters::prelude::*;

use super::artifact::{Artifact, ArtifactKind};
use super::error::RenderError;
use super::page::{PageSize, SinglePageDocument};

/// Renders labelled values as a one-page proportional chart.
pub trait ChartRenderer {
    fn render_chart(
        &self,
        categories: &[&str],
        values: &[f64],
        destination: &Path,
    ) -> Result<Artifact, RenderError>;
}

const CHART_WIDTH_PX: u32 = 1000;
const CHART_HEIGHT_PX: u32 = 600;
const CHART_PAGE: PageSize = PageSize {
    width: 720,
    height: 432,
};

struct ChartStyle;

impl ChartStyle {
    const TITLE: &'static str = "Carbon Emissions Rates in the Company";
    const DOCUMENT_TITLE: &'static str = "Carbon Emissions Chart";
    const LEGEND_TITLE: &'static str = "Emissions Categories";
    const EMPTY_LABEL: &'static str = "No emissions recorded";
    const FONT_FAMILY: &'static str = "sans-serif";
    const TITLE_FONT_SIZE: i32 = 36;
    const LABEL_FONT_SIZE: i32 = 20;
    const PERCENT_FONT_SIZE: i32 = 18;
    const LEGEND_FONT_SIZE: i32 = 18;
    const START_ANGLE_DEG: f64 = 140.0;
    const RADIUS_RATIO: f64 = 0.36;
    const LEGEND_WIDTH: i32 = 230;
    const LEGEND_ROW_HEIGHT: i32 = 28;
    const LEGEND_SWATCH: i32 = 16;
    const LEGEND_MARGIN: i32 = 12;
    const BACKGROUND: RGBColor = WHITE;
    const EMPTY_SLICE: RGBColor = RGBColor(200, 200, 200);
    const PALETTE: [RGBColor; 4] = [
        RGBColor(31, 119, 180),
        RGBColor(255, 127, 14),
        RGBColor(44, 160, 44),
        RGBColor(214, 39, 40),
    ];

    fn slice_color(index: usize) -> RGBColor {
        Self::PALETTE[index % Self::PALETTE.len()]
    }
}

#[derive(Debug, PartialEq)]
pub(crate) enum PiePlan {
    Proportional { labels: Vec<String>, sizes: Vec<f64> },
    /// Every value is zero; shares are undefined.
    Empty,
}

pub(crate) fn plan_slices(categories: &[&str], values: &[f64]) -> Result<PiePlan, RenderError> {
    if categories.len() != values.len() {
        return Err(RenderError::LengthMismatch {
            categories: categories.len(),
            values: values.len(),
        });
    }

    for (label, value) in categories.iter().zip(values) {
        if !value.is_finite() || *value < 0.0 {
            return Err(RenderError::InvalidValue {
                label: (*label).to_string(),
                value: *value,
            });
        }
    }

    let total: f64 = values.iter().sum();
    if total <= 0.0 {
        return Ok(PiePlan::Empty);
    }

    Ok(PiePlan::Proportional {
        labels: categories.iter().map(|label| (*label).to_string()).collect(),
        sizes: values.to_vec(),
    })
}

/// Pie chart drawn with plotters and embedded as an image on a PDF page.
pub struct PieChartRenderer {
    image_copy: Option<PathBuf>,
}

impl PieChartRenderer {
    /// `image_copy` additionally stores the chart bitmap as a PNG.
    pub fn new(image_copy: Option<PathBuf>) -> Self {
        Self { image_copy }
    }
}

impl ChartRenderer for PieChartRenderer {
    fn render_chart(
        &self,
        categories: &[&str],
        values: &[f64],
        destination: &Path,
    ) -> Result<Artifact, RenderError> {
        let plan = plan_slices(categories, values)?;
        if plan == PiePlan::Empty {
            log::warn!("chart_degenerate reason=all_values_zero");
        }

        let rgb_buffer = draw_pie_rgb(&plan)?;

        if let Some(image_path) = &self.image_copy {
            write_png(&rgb_buffer, image_path)?;
            log::info!("chart_image_written path={}", image_path.display());
        }

        write_chart_page(rgb_buffer, destination)?;
        Ok(Artifact::new(ArtifactKind::Chart, destination))
    }
}

fn backend_error<E: std::fmt::Debug>(stage: &'static str) -> impl Fn(E) -> RenderError {
    move |error| RenderError::Backend(format!("{} error: {:?}", stage, error))
}

fn draw_pie_rgb(plan: &PiePlan) -> Result<Vec<u8>, RenderError> {
    let mut rgb_buffer = vec![255u8; CHART_WIDTH_PX as usize * CHART_HEIGHT_PX as usize * 3];

    {
        let root = BitMapBackend::with_buffer(&mut rgb_buffer, (CHART_WIDTH_PX, CHART_HEIGHT_PX))
            .into_drawing_area();
        root.fill(&ChartStyle::BACKGROUND)
            .map_err(backend_error("background fill"))?;

        let area = root
            .titled(
                ChartStyle::TITLE,
                (ChartStyle::FONT_FAMILY, ChartStyle::TITLE_FONT_SIZE),
            )
            .map_err(backend_error("title"))?;

        let (width, height) = area.dim_in_pixel();
        let center = ((width / 2) as i32, (height / 2) as i32);
        let radius = f64::from(width.min(height)) * ChartStyle::RADIUS_RATIO;
        let label_style = (ChartStyle::FONT_FAMILY, ChartStyle::LABEL_FONT_SIZE)
            .into_font()
            .color(&BLACK);

        match plan {
            PiePlan::Proportional { labels, sizes } => {
                let colors: Vec<RGBColor> =
                    (0..sizes.len()).map(ChartStyle::slice_color).collect();
                let mut pie = Pie::new(&center, &radius, sizes, &colors, labels);
                pie.start_angle(ChartStyle::START_ANGLE_DEG);
                pie.label_style(label_style);
                pie.percentages(
                    (ChartStyle::FONT_FAMILY, ChartStyle::PERCENT_FONT_SIZE)
                        .into_font()
                        .color(&WHITE),
                );
                area.draw(&pie).map_err(backend_error("pie draw"))?;
                draw_legend(&area, labels, &colors)?;
            }
            PiePlan::Empty => {
                let sizes = [1.0];
                let colors = [ChartStyle::EMPTY_SLICE];
                let labels = [ChartStyle::EMPTY_LABEL];
                let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
                pie.start_angle(ChartStyle::START_ANGLE_DEG);
                pie.label_style(label_style);
                area.draw(&pie).map_err(backend_error("pie draw"))?;
            }
        }

        root.present().map_err(backend_error("present"))?;
    }

    Ok(rgb_buffer)
}

fn draw_legend(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    labels: &[String],
    colors: &[RGBColor],
) -> Result<(), RenderError> {
    let (width, _) = area.dim_in_pixel();
    let left = width as i32 - ChartStyle::LEGEND_WIDTH - ChartStyle::LEGEND_MARGIN;
    let top = ChartStyle::LEGEND_MARGIN;
    let bottom = top + ChartStyle::LEGEND_ROW_HEIGHT * (labels.len() as i32 + 1);
    let text_style = (ChartStyle::FONT_FAMILY, ChartStyle::LEGEND_FONT_SIZE)
        .into_font()
        .color(&BLACK);

    area.draw(&Rectangle::new(
        [(left, top), (left + ChartStyle::LEGEND_WIDTH, bottom)],
        BLACK.mix(0.3).stroke_width(1),
    ))
    .map_err(backend_error("legend frame"))?;
    area.draw(&Text::new(
        ChartStyle::LEGEND_TITLE.to_string(),
        (left + ChartStyle::LEGEND_MARGIN, top + 6),
        text_style.clone(),
    ))
    .map_err(backend_error("legend title"))?;

    for (row, (label, color)) in labels.iter().zip(colors).enumerate() {
        let y = top + ChartStyle::LEGEND_ROW_HEIGHT * (row as i32 + 1) + 6;
        let x = left + ChartStyle::LEGEND_MARGIN;
        area.draw(&Rectangle::new(
            [
                (x, y),
                (x + ChartStyle::LEGEND_SWATCH, y + ChartStyle::LEGEND_SWATCH),
            ],
            color.filled(),
        ))
        .map_err(backend_error("legend swatch"))?;
        area.draw(&Text::new(
            label.clone(),
            (x + ChartStyle::LEGEND_SWATCH + 10, y),
            text_style.clone(),
        ))
        .map_err(backend_error("legend label"))?;
    }

    Ok(())
}

fn write_png(rgb_buffer: &[u8], destination: &Path) -> Result<(), RenderError> {
    let rgb_image = RgbImage::from_raw(CHART_WIDTH_PX, CHART_HEIGHT_PX, rgb_buffer.to_vec())
        .ok_or_else(|| RenderError::Encoding("image buffer conversion failed".to_string()))?;
    let mut output = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(rgb_image)
        .write_to(&mut output, ImageFormat::Png)
        .map_err(|error| RenderError::Encoding(format!("png encoding error: {}", error)))?;

    std::fs::write(destination, output.into_inner()).map_err(|error| RenderError::Write {
        path: destination.display().to_string(),
        message: error.to_string(),
    })
}

fn write_chart_page(rgb_buffer: Vec<u8>, destination: &Path) -> Result<(), RenderError> {
    let mut page = SinglePageDocument::new(ChartStyle::DOCUMENT_TITLE);
    let image_id = page.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => i64::from(CHART_WIDTH_PX),
            "Height" => i64::from(CHART_HEIGHT_PX),
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
        },
        rgb_buffer,
    ));

    // Scale the unit image square to the full page.
    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    CHART_PAGE.width.into(),
                    0.into(),
                    0.into(),
                    CHART_PAGE.height.into(),
                    0.into(),
                    0.into(),
                ],
            ),
            Operation::new("Do", vec![Object::Name(b"Chart".to_vec())]),
            Operation::new("Q", vec![]),
        ],
    };
    let resources = dictionary! {
        "XObject" => dictionary! {
            "Chart" => image_id,
        },
    };

    page.write(CHART_PAGE, resources, content, destination)
}
