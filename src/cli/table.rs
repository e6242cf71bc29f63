use once_cell::sync::Lazy;
use std::collections::{BTreeMap, HashMap};

/// Program the completions are registered for
pub const PROGRAM: &str = "grond";

/// Deepest cursor position that has table entries
pub const MAX_DEPTH: usize = 4;

/// Top-level subcommands, offered at depth 1
pub const SUBCOMMANDS: &[&str] = &[
    "init",
    "check",
    "go",
    "forward",
    "harvest",
    "map-geometry",
    "plot",
    "export",
];

/// Where the candidates for one table cell come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Fixed words
    Words(&'static [&'static str]),
    /// File lister over the working directory
    Files,
    /// Directory lister over the working directory
    Dirs,
}

impl Source {
    /// Human readable rendering, used by the `table` command
    pub fn describe(&self) -> Vec<String> {
        match self {
            Source::Words(words) => words.iter().map(|w| w.to_string()).collect(),
            Source::Files => vec!["<files>".to_string()],
            Source::Dirs => vec!["<dirs>".to_string()],
        }
    }
}

const INIT_WORDS: &[&str] = &[
    "list",
    "--targets",
    "--problem",
    "--full",
    "--force",
    "--help",
    "-h",
    "--loglevel",
];
const CHECK_FLAGS: &[&str] = &[
    "--target-ids",
    "--waveforms",
    "--nrandom",
    "--help",
    "-h",
    "--loglevel",
];
const GO_FLAGS: &[&str] = &[
    "--event",
    "--force",
    "--status",
    "--parallel",
    "--help",
    "-h",
    "--loglevel",
];
const FORWARD_FLAGS: &[&str] = &["--help", "-h", "--loglevel"];
const HARVEST_FLAGS: &[&str] = &["--force", "--neach", "--weed", "--help", "-h", "--loglevel"];
const MAP_GEOMETRY_FLAGS: &[&str] = &["--help", "-h", "--loglevel"];
const PLOT_NAMES: &[&str] = &[
    "bootstrap",
    "sequence",
    "hudson",
    "solution",
    "jointpar",
    "fits",
    "contributions",
    "all",
];
const PLOT_FLAGS: &[&str] = &["--save", "--format", "--dpi", "--help", "-h", "--loglevel"];
const EXPORT_KINDS: &[&str] = &["best", "mean", "ensemble", "stats"];
const EXPORT_FLAGS: &[&str] = &["--type", "--parameters", "--output", "--help", "-h", "--loglevel"];

const TOP: &[Source] = &[Source::Words(SUBCOMMANDS)];
const FILES: &[Source] = &[Source::Files];
const DIRS: &[Source] = &[Source::Dirs];
const INIT_ARGS: &[Source] = &[Source::Words(INIT_WORDS)];
const CHECK_ARGS: &[Source] = &[Source::Words(CHECK_FLAGS)];
const GO_ARGS: &[Source] = &[Source::Words(GO_FLAGS)];
const FORWARD_ARGS: &[Source] = &[Source::Words(FORWARD_FLAGS)];
const HARVEST_ARGS: &[Source] = &[Source::Words(HARVEST_FLAGS)];
const MAP_GEOMETRY_ARGS: &[Source] = &[Source::Words(MAP_GEOMETRY_FLAGS)];
const PLOT_WHAT: &[Source] = &[Source::Words(PLOT_NAMES)];
const PLOT_RUNDIR: &[Source] = &[Source::Dirs, Source::Words(PLOT_FLAGS)];
const PLOT_ARGS: &[Source] = &[Source::Words(PLOT_FLAGS)];
const EXPORT_WHAT: &[Source] = &[Source::Words(EXPORT_KINDS)];
const EXPORT_RUNDIR: &[Source] = &[Source::Dirs, Source::Words(EXPORT_FLAGS)];
const EXPORT_ARGS: &[Source] = &[Source::Words(EXPORT_FLAGS)];

static TABLE: Lazy<HashMap<(usize, &'static str), &'static [Source]>> = Lazy::new(|| {
    let mut table: HashMap<(usize, &'static str), &'static [Source]> = HashMap::new();

    table.insert((2, "init"), INIT_ARGS);

    table.insert((2, "check"), FILES);
    table.insert((3, "check"), CHECK_ARGS);
    table.insert((4, "check"), CHECK_ARGS);

    table.insert((2, "go"), FILES);
    table.insert((3, "go"), GO_ARGS);
    table.insert((4, "go"), GO_ARGS);

    table.insert((2, "forward"), DIRS);
    table.insert((3, "forward"), FORWARD_ARGS);
    table.insert((4, "forward"), FORWARD_ARGS);

    table.insert((2, "harvest"), DIRS);
    table.insert((3, "harvest"), HARVEST_ARGS);
    table.insert((4, "harvest"), HARVEST_ARGS);

    table.insert((2, "map-geometry"), FILES);
    table.insert((3, "map-geometry"), MAP_GEOMETRY_ARGS);
    table.insert((4, "map-geometry"), MAP_GEOMETRY_ARGS);

    // plot/export take <what> <rundir>, so depth 3 mixes run directories with flags
    table.insert((2, "plot"), PLOT_WHAT);
    table.insert((3, "plot"), PLOT_RUNDIR);
    table.insert((4, "plot"), PLOT_ARGS);

    table.insert((2, "export"), EXPORT_WHAT);
    table.insert((3, "export"), EXPORT_RUNDIR);
    table.insert((4, "export"), EXPORT_ARGS);

    table
});

/// Sources for a cursor depth and subcommand. Unknown pairs have none.
pub fn lookup(depth: usize, subcommand: &str) -> &'static [Source] {
    if depth == 1 {
        return TOP;
    }
    TABLE.get(&(depth, subcommand)).copied().unwrap_or(&[])
}

/// The whole table keyed by subcommand then depth, for display
pub fn dump() -> BTreeMap<String, BTreeMap<usize, Vec<String>>> {
    let mut out: BTreeMap<String, BTreeMap<usize, Vec<String>>> = BTreeMap::new();
    for ((depth, subcommand), sources) in TABLE.iter() {
        let words = sources.iter().flat_map(Source::describe).collect();
        out.entry(subcommand.to_string()).or_default().insert(*depth, words);
    }
    out
}
