use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use quarterly_diff_core::{Publisher, ReportFormat};

/// Compares two quarterly holding reports and writes the new, updated and
/// deprecated investments.
#[derive(Parser, Debug)]
#[command(name = "quarterly-diff", version)]
pub struct Args {
    /// Report of the earlier quarter (.xls or .xlsx).
    pub previous: PathBuf,

    /// Report of the later quarter (.xls or .xlsx).
    pub current: PathBuf,

    /// Where to write the report. Overrides QD_OUTPUT_PATH.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = FormatArg::Xlsx)]
    pub format: FormatArg,

    /// JSON layout configuration. Overrides QD_CONFIG_PATH.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Column layout: detect from the header row, or a publisher preset.
    #[arg(short, long, value_enum, default_value_t = LayoutArg::Detect)]
    pub layout: LayoutArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Xlsx,
    Csv,
}

impl From<FormatArg> for ReportFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Xlsx => ReportFormat::Xlsx,
            FormatArg::Csv => ReportFormat::Csv,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayoutArg {
    Detect,
    Menora,
    Harel,
    Altshuler,
    Phoenix,
}

impl LayoutArg {
    /// `None` means the layout comes from the configuration file.
    pub fn publisher(self) -> Option<Publisher> {
        match self {
            LayoutArg::Detect => None,
            LayoutArg::Menora => Some(Publisher::Menora),
            LayoutArg::Harel => Some(Publisher::Harel),
            LayoutArg::Altshuler => Some(Publisher::Altshuler),
            LayoutArg::Phoenix => Some(Publisher::Phoenix),
        }
    }
}
