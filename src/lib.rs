//! Static chart rendering for a recorded satellite communication session.
//!
//! Three independent generators each draw one PNG from literal data:
//! - [`generator::OrbitGenerator`]: azimuth/elevation polar plot
//! - [`generator::MetricsGenerator`]: 2x2 grid of signal processing metrics
//! - [`generator::SearchGenerator`]: frequency search correlation results
//!
//! [`driver::run`] renders all three in sequence and prints progress banners.

pub mod canvas;
pub mod driver;
pub mod error;
pub mod generator;
pub mod style;
pub mod widgets;

pub use canvas::Canvas;
pub use error::{Result, VizError};
