mod artifact;
mod chart;
mod error;
mod page;
mod report;

pub use artifact::{Artifact, ArtifactKind};
pub use chart::{ChartRenderer, PieChartRenderer};
pub use error::RenderError;
pub use report::{render_report, ReportContext};

#[cfg(test)]
pub(crate) use page::{write_blank_page, PageSize};
