pub mod aggregator;
pub mod lines;
pub mod matcher;
pub mod parser;

pub use aggregator::{collect_imports, CollectionReport, ImportCollector, ImportSet};
pub use lines::split_lines;
pub use matcher::matches_package;
pub use parser::{extract_imports, scan_fragments, Fragment, ScanState};
