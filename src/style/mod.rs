//! Plot style: colors, symbols, track ranges and window sizes.
//!
//! A style is read from an optional TOML file. Every section and key may be
//! omitted, in which case the defaults below apply:
//!
//! ```toml
//! [contigs]
//! color = "green"
//! filtered_color = "grey"
//! missing_color = "red"
//!
//! [gc]
//! pos_deviation_color = "dorange"
//! neg_deviation_color = "dblue"
//! thickness = "1p"
//! min = -15.0
//! max = 15.0
//! show_background = "data"
//! window_size = 1000
//!
//! [rrna]
//! size = "32p"
//! 5S_symbol = "C"
//! 5S_color = "dgrey"
//! 16S_symbol = "I"
//! 16S_color = "dgrey"
//! 23S_symbol = "O"
//! 23S_color = "dgrey"
//! show_background = "yes"
//!
//! [trna]
//! size = "32p"
//! color = "dred"
//! symbol = "F"
//! show_background = "yes"
//!
//! [coverage]
//! # same keys as [gc]; min = -300.0, max = 300.0
//! ```
//!
//! Colors are Circos color names and symbols are glyphs from the Circos
//! symbol font.

pub mod plot_style;

pub use plot_style::{BackgroundMode, DeviationStyle, PlotStyle, StyleError};
