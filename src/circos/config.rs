//! Circos `.conf` files rendered from the plot style and karyotype.

use std::path::Path;

use crate::style::plot_style::{BackgroundMode, DeviationStyle, PlotStyle};
use crate::tracks::karyotype::Karyotype;

/// Ideograms shorter than this get no tick marks
pub const MIN_CONTIG_LEN_FOR_TICKS: u64 = 5000;

pub const CIRCOS_CONF: &str = "circos.conf";
pub const IDEOGRAM_CONF: &str = "ideogram.conf";
pub const TICKS_CONF: &str = "ticks.conf";
pub const GC_CONF: &str = "gc.conf";
pub const COVERAGE_CONF: &str = "coverage.conf";
pub const RRNA_CONF: &str = "rrna.conf";
pub const TRNA_CONF: &str = "trna.conf";

pub const KARYOTYPE_DATA: &str = "karyotype.tsv";
pub const GC_DATA: &str = "gc.tsv";
pub const COVERAGE_DATA: &str = "coverage.tsv";
pub const RRNA_DATA: &str = "rrna.tsv";
pub const TRNA_DATA: &str = "trna.tsv";

/// Radial extent of a plot track, in fractions of the ideogram inner radius
#[derive(Debug, Clone, Copy)]
struct Radius {
    r0: f64,
    r1: f64,
}

const GC_RADIUS: Radius = Radius { r0: 0.75, r1: 0.95 };
const COVERAGE_RADIUS: Radius = Radius { r0: 0.52, r1: 0.72 };
const RRNA_RADIUS: Radius = Radius { r0: 0.38, r1: 0.50 };
const TRNA_RADIUS: Radius = Radius { r0: 0.26, r1: 0.38 };

/// The set of Circos configuration files for one plot
#[derive(Debug)]
pub struct CircosConfig<'a> {
    style: &'a PlotStyle,
    karyotype: &'a Karyotype,
    with_coverage: bool,
}

impl<'a> CircosConfig<'a> {
    pub fn new(style: &'a PlotStyle, karyotype: &'a Karyotype, with_coverage: bool) -> Self {
        Self {
            style,
            karyotype,
            with_coverage,
        }
    }

    /// File name and contents of every configuration file
    pub fn files(&self) -> Vec<(&'static str, String)> {
        let mut files = vec![
            (CIRCOS_CONF, self.circos_conf()),
            (IDEOGRAM_CONF, ideogram_conf()),
            (TICKS_CONF, self.ticks_conf()),
            (GC_CONF, histogram_conf(GC_DATA, GC_RADIUS, &self.style.gc)),
            (
                RRNA_CONF,
                text_conf(RRNA_DATA, RRNA_RADIUS, &self.style.rrna.size, self.style.rrna.show_background),
            ),
            (
                TRNA_CONF,
                text_conf(TRNA_DATA, TRNA_RADIUS, &self.style.trna.size, self.style.trna.show_background),
            ),
        ];
        if self.with_coverage {
            files.push((
                COVERAGE_CONF,
                histogram_conf(COVERAGE_DATA, COVERAGE_RADIUS, &self.style.coverage),
            ));
        }
        files
    }

    /// Write every configuration file into `dir`
    ///
    /// # Errors
    ///
    /// Returns an IO error if a file cannot be written.
    pub fn write(&self, dir: &Path) -> std::io::Result<()> {
        for (name, content) in self.files() {
            std::fs::write(dir.join(name), content)?;
        }
        Ok(())
    }

    fn circos_conf(&self) -> String {
        let coverage = if self.with_coverage {
            format!("<<include {COVERAGE_CONF}>>\n")
        } else {
            String::new()
        };

        format!(
            "<<include {IDEOGRAM_CONF}>>
<<include {TICKS_CONF}>>

karyotype = {KARYOTYPE_DATA}
chromosomes_units = 1000
chromosomes_display_default = yes

<plots>
<<include {GC_CONF}>>
{coverage}<<include {RRNA_CONF}>>
<<include {TRNA_CONF}>>
</plots>

{IMAGE_BLOCK}
<<include etc/colors_fonts_patterns.conf>>
<<include etc/housekeeping.conf>>
"
        )
    }

    fn ticks_conf(&self) -> String {
        let short = self.karyotype.shorter_than(MIN_CONTIG_LEN_FOR_TICKS);
        let exclusions = if short.is_empty() {
            String::new()
        } else {
            let excluded: Vec<String> = short.iter().map(|id| format!("-{id}")).collect();
            format!("chromosomes = {}\n", excluded.join(";"))
        };

        format!("{TICKS_HEADER}{exclusions}</ticks>\n")
    }
}

const IMAGE_BLOCK: &str = "<image>
dir = .
file = circos.png
png = yes
svg = yes
radius = 1500p
angle_offset = -90
auto_alpha_colors = yes
auto_alpha_steps = 5
background = white
</image>
";

const TICKS_HEADER: &str = "show_ticks = yes
show_tick_labels = yes

<ticks>
radius = 1r
color = black
thickness = 2p
multiplier = 1e-3
format = %d

<tick>
spacing = 10u
size = 10p
</tick>

<tick>
spacing = 100u
size = 15p
show_label = yes
label_size = 20p
label_offset = 10p
format = %d kb
</tick>

";

fn ideogram_conf() -> String {
    "<ideogram>

<spacing>
default = 0.005r
</spacing>

radius = 0.85r
thickness = 30p
fill = yes
stroke_color = dgrey
stroke_thickness = 2p

show_label = yes
label_font = default
label_radius = 1r + 75p
label_size = 30
label_parallel = yes

</ideogram>
"
    .to_string()
}

fn backgrounds_block(show: BackgroundMode) -> String {
    format!(
        "<backgrounds>
show = {show}
<background>
color = vvlgrey
</background>
</backgrounds>
"
    )
}

/// Histogram of deviation values; per-record `fill_color` sets the bar color
fn histogram_conf(data: &str, radius: Radius, style: &DeviationStyle) -> String {
    format!(
        "<plot>
type = histogram
file = {data}
r0 = {r0}r
r1 = {r1}r
min = {min}
max = {max}
thickness = {thickness}
orientation = out
extend_bin = no
fill_under = yes

{backgrounds}
<axes>
<axis>
color = lgrey
thickness = 1
position = 0
</axis>
</axes>
</plot>
",
        r0 = radius.r0,
        r1 = radius.r1,
        min = style.min,
        max = style.max,
        thickness = style.thickness,
        backgrounds = backgrounds_block(style.show_background),
    )
}

/// Text track drawing one glyph per gene; per-record `color` sets the glyph color
fn text_conf(data: &str, radius: Radius, label_size: &str, show: BackgroundMode) -> String {
    format!(
        "<plot>
type = text
file = {data}
r0 = {r0}r
r1 = {r1}r
label_font = glyph
label_size = {label_size}
label_snuggle = yes
max_snuggle_distance = 2r
show_links = no
padding = 0p
rpadding = 0p

{backgrounds}</plot>
",
        r0 = radius.r0,
        r1 = radius.r1,
        backgrounds = backgrounds_block(show),
    )
}
