use log::debug;
use std::collections::HashSet;

use crate::cli::table::{self, MAX_DEPTH, Source};
use crate::ports::FileSystem;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    pub completion_type: CompletionType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionType {
    Subcommand,
    Keyword,
    Flag,
    File,
    Directory,
}

impl CompletionType {
    /// Short label shown next to candidates by shells that support it
    pub fn description(&self) -> &'static str {
        match self {
            CompletionType::Subcommand => "subcommand",
            CompletionType::Keyword => "argument",
            CompletionType::Flag => "option",
            CompletionType::File => "file",
            CompletionType::Directory => "directory",
        }
    }
}

/// Resolves the candidates for one cursor position of a grond command line
pub struct CompletionGenerator<F: FileSystem> {
    fs: F,
    follow_dirs: bool,
}

impl<F: FileSystem> CompletionGenerator<F> {
    pub fn new(fs: F) -> Self {
        Self { fs, follow_dirs: true }
    }

    pub fn with_follow_dirs(mut self, follow_dirs: bool) -> Self {
        self.follow_dirs = follow_dirs;
        self
    }

    /// Candidates for `tokens[cursor]`, where `tokens[0]` is the program name.
    ///
    /// Candidates are prefix-filtered against the current token and deduplicated,
    /// first occurrence wins. Positions without a table entry (the program name,
    /// anything past depth four, unknown subcommands) yield nothing.
    pub fn resolve<S: AsRef<str>>(&self, tokens: &[S], cursor: usize) -> Vec<Completion> {
        if cursor == 0 || cursor > MAX_DEPTH || cursor >= tokens.len() {
            debug!("no completions at cursor={cursor} tokens={}", tokens.len());
            return vec![];
        }

        let partial = tokens[cursor].as_ref();
        let subcommand = if cursor == 1 { "" } else { tokens[1].as_ref() };

        let mut seen = HashSet::new();
        let mut completions = Vec::new();

        for source in table::lookup(cursor, subcommand) {
            for completion in self.expand(source, cursor, partial) {
                if completion.text.starts_with(partial) && seen.insert(completion.text.clone()) {
                    completions.push(completion);
                }
            }
        }

        debug!(
            "resolved {} completions for subcommand='{subcommand}' depth={cursor} partial='{partial}'",
            completions.len()
        );
        completions
    }

    /// Same as `resolve`, text only
    pub fn resolve_words<S: AsRef<str>>(&self, tokens: &[S], cursor: usize) -> Vec<String> {
        self.resolve(tokens, cursor).into_iter().map(|c| c.text).collect()
    }

    fn expand(&self, source: &Source, depth: usize, partial: &str) -> Vec<Completion> {
        match source {
            Source::Words(words) => words
                .iter()
                .map(|word| Completion {
                    text: word.to_string(),
                    completion_type: word_type(depth, word),
                })
                .collect(),
            Source::Files => self
                .fs
                .list_files(partial)
                .into_iter()
                .map(|text| Completion {
                    text,
                    completion_type: CompletionType::File,
                })
                .collect(),
            Source::Dirs => self
                .fs
                .list_dirs(partial, self.follow_dirs)
                .into_iter()
                .map(|text| Completion {
                    text,
                    completion_type: CompletionType::Directory,
                })
                .collect(),
        }
    }
}

fn word_type(depth: usize, word: &str) -> CompletionType {
    if depth == 1 {
        CompletionType::Subcommand
    } else if word.starts_with('-') {
        CompletionType::Flag
    } else {
        CompletionType::Keyword
    }
}
