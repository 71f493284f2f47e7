pub mod convert;
pub mod error;
pub mod geometry;
pub mod model;
pub mod parser;
pub mod writer;

pub use convert::{convert, ConvertOptions, ConvertReport};
pub use error::{Result, SvxDemError};
pub use geometry::{GridSpacing, Stations};
pub use model::{AsciiDem, DemHeader, GridRow, Station};
pub use writer::{SvxConfig, SvxWriter};
