//! content scanning stuff
use {
    crate::{
        cancel::CancelToken,
        diagnostics::Warning,
        error::{BuildError, ConfigurationError, Result},
        scan::{ContentSource, TokenSet, extract::extract_tokens},
    },
    globset::{GlobMatcher, GlobSet, GlobSetBuilder},
    jwalk::WalkDir,
    rayon::iter::{IntoParallelRefIterator, ParallelIterator},
    std::{
        collections::BTreeSet,
        path::{Component, Path, PathBuf},
    },
    tracing::{debug, info, trace, warn},
};

/// directories never descended into unless a pattern's base is inside one
const PRUNED_DIRS: &[&str] = &["node_modules"];

/// everything a scan found
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    /// the distinct candidate tokens
    pub tokens: TokenSet,
    /// problems with individual sources
    pub warnings: Vec<Warning>,
    /// how many files were read
    pub files: usize,
    /// how many bytes were read, inline content included
    pub bytes: u64,
}

/// a content scanner
#[async_trait::async_trait]
pub trait ContentScanner: Send + Sync {
    /// scan every source for class tokens
    async fn scan(&self, sources: &[ContentSource], cancel: &CancelToken) -> Result<ScanOutcome>;
}

/// a filesystem scanner
#[derive(Debug, Clone)]
pub struct FsScanner {
    /// the directory relative patterns are resolved against
    root: PathBuf,
    /// how many threads to read with
    num_threads: usize,
    /// files over this many bytes are skipped with a warning
    max_file_size: Option<u64>,
}

/// what reading a single file produced
enum FileScan {
    /// the tokens and the number of bytes read
    Read(TokenSet, u64),
    /// the file was skipped
    Skipped(Warning),
    /// the build was cancelled before the file was read
    Cancelled,
}

impl FsScanner {
    /// make a new filesystem scanner rooted at a directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            num_threads: num_cpus::get().max(4),
            max_file_size: None,
        }
    }

    /// make a new filesystem scanner with a custom thread count
    pub fn with_threads(root: impl Into<PathBuf>, num_threads: usize) -> Self {
        Self {
            root: root.into(),
            num_threads: num_threads.max(1),
            max_file_size: None,
        }
    }

    /// skip files larger than `limit` bytes
    pub fn with_max_file_size(mut self, limit: Option<u64>) -> Self {
        self.max_file_size = limit;
        self
    }

    /// the scan root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// resolve the glob sources to a sorted, deduplicated file list
    ///
    /// negated globs remove files any positive glob matched. a positive glob
    /// that matches nothing of its own is a warning, an empty file set with no
    /// inline content is fatal, even when every glob was negated
    pub fn resolve_files(
        &self,
        sources: &[ContentSource],
        cancel: &CancelToken,
    ) -> Result<(BTreeSet<PathBuf>, Vec<Warning>)> {
        let excluded = self.exclusions(sources)?;
        let mut files = BTreeSet::new();
        let mut warnings = Vec::new();
        let mut tried = Vec::new();

        for source in sources.iter().filter(|s| !s.is_raw() && !s.is_negated()) {
            if cancel.is_cancelled() {
                return Err(BuildError::Cancelled);
            }

            let source = if source.is_literal() && self.absolute(&source.to_string()).is_dir() {
                source.clone().into_directory()
            } else {
                source.clone()
            };
            tried.push(source.to_string());

            let matched = if source.is_literal() {
                let path = self.absolute(&source.to_string());
                if path.is_file() { vec![path] } else { Vec::new() }
            } else {
                self.walk(&source, cancel)?
            };

            let kept: Vec<PathBuf> = matched
                .into_iter()
                .filter(|path| !excluded.is_match(self.match_path(path)))
                .collect();

            debug!("Pattern {} matched {} files", source, kept.len());

            if kept.is_empty() {
                warnings.push(Warning::UnmatchedGlob {
                    pattern: source.to_string(),
                });
            }
            files.extend(kept);
        }

        if files.is_empty() && !sources.iter().any(ContentSource::is_raw) {
            if tried.is_empty() {
                tried = sources.iter().map(ToString::to_string).collect();
            }

            return Err(ConfigurationError::NoContentFiles {
                patterns: tried,
                root: self.root.clone(),
            }
            .into());
        }

        warnings.sort();
        Ok((files, warnings))
    }

    /// read every file and extract its tokens
    pub fn scan_blocking(&self, sources: &[ContentSource], cancel: &CancelToken) -> Result<ScanOutcome> {
        if sources.is_empty() {
            return Err(ConfigurationError::EmptyContent.into());
        }

        let (files, mut warnings) = self.resolve_files(sources, cancel)?;
        let files: Vec<PathBuf> = files.into_iter().collect();

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.num_threads)
            .build()?;

        let results: Vec<FileScan> = pool.install(|| {
            files
                .par_iter()
                .map(|path| self.read_file(path, cancel))
                .collect()
        });

        let mut outcome = ScanOutcome::default();

        for result in results {
            match result {
                FileScan::Read(tokens, bytes) => {
                    outcome.tokens.extend(tokens);
                    outcome.files += 1;
                    outcome.bytes += bytes;
                }
                FileScan::Skipped(warning) => warnings.push(warning),
                FileScan::Cancelled => return Err(BuildError::Cancelled),
            }
        }

        for source in sources {
            if let ContentSource::Raw { content, .. } = source {
                extract_tokens(content, &mut outcome.tokens);
                outcome.bytes += content.len() as u64;
            }
        }

        if cancel.is_cancelled() {
            return Err(BuildError::Cancelled);
        }

        for warning in &warnings {
            warn!("{}", warning);
        }

        info!(
            "Scanned {} files ({} bytes), found {} candidate tokens",
            outcome.files,
            outcome.bytes,
            outcome.tokens.len()
        );

        outcome.warnings = warnings;
        Ok(outcome)
    }

    /// read a single file
    fn read_file(&self, path: &Path, cancel: &CancelToken) -> FileScan {
        if cancel.is_cancelled() {
            return FileScan::Cancelled;
        }

        let unreadable = |reason: String| {
            FileScan::Skipped(Warning::UnreadableSource {
                path: path.to_path_buf(),
                reason,
            })
        };

        if let Some(limit) = self.max_file_size {
            match std::fs::metadata(path) {
                Ok(meta) if meta.len() > limit => {
                    return FileScan::Skipped(Warning::OversizedSource {
                        path: path.to_path_buf(),
                        size: meta.len(),
                        limit,
                    });
                }
                Ok(_) => {}
                Err(e) => return unreadable(e.to_string()),
            }
        }

        match std::fs::read(path) {
            Ok(bytes) => {
                let text = String::from_utf8_lossy(&bytes);
                let mut tokens = TokenSet::new();
                extract_tokens(&text, &mut tokens);
                trace!("Found {} tokens in {}", tokens.len(), path.display());
                FileScan::Read(tokens, bytes.len() as u64)
            }
            Err(e) => unreadable(e.to_string()),
        }
    }

    /// walk a glob's base directory for matching files
    fn walk(&self, source: &ContentSource, cancel: &CancelToken) -> Result<Vec<PathBuf>> {
        let ContentSource::Glob {
            base, extensions, ..
        } = source
        else {
            return Ok(Vec::new());
        };

        let Some(matcher) = source.matcher()? else {
            return Ok(Vec::new());
        };

        let base_dir = self.root.join(base);
        if !base_dir.is_dir() {
            return Ok(Vec::new());
        }

        let prune = !base.components().any(|c| is_pruned_component(&c));

        let paths = WalkDir::new(&base_dir)
            .skip_hidden(true)
            .follow_links(false)
            .parallelism(jwalk::Parallelism::RayonNewPool(self.num_threads))
            .process_read_dir(move |_depth, _path, _state, children| {
                if prune {
                    children.retain(|entry| {
                        entry.as_ref().map_or(true, |e| {
                            !(e.file_type().is_dir()
                                && PRUNED_DIRS.iter().any(|dir| e.file_name() == *dir))
                        })
                    });
                }
            })
            .into_iter()
            .take_while(|_| !cancel.is_cancelled())
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.path())
            .filter(|path| extension_allowed(path, extensions))
            .filter(|path| self.is_match(&matcher, path))
            .collect();

        if cancel.is_cancelled() {
            return Err(BuildError::Cancelled);
        }

        Ok(paths)
    }

    /// compile every negated glob into a single set
    fn exclusions(&self, sources: &[ContentSource]) -> Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();

        for source in sources.iter().filter(|s| s.is_negated()) {
            if let ContentSource::Glob { pattern, .. } = source {
                let glob = globset::GlobBuilder::new(pattern)
                    .literal_separator(true)
                    .build()
                    .map_err(|e| ConfigurationError::InvalidGlob {
                        pattern: pattern.clone(),
                        source: e,
                    })?;
                builder.add(glob);
            }
        }

        builder.build().map_err(|e| {
            ConfigurationError::InvalidGlob {
                pattern: "<exclusions>".to_string(),
                source: e,
            }
            .into()
        })
    }

    /// match a path the way patterns are written
    fn is_match(&self, matcher: &GlobMatcher, path: &Path) -> bool {
        matcher.is_match(self.match_path(path)) || matcher.is_match(path)
    }

    /// the root-relative, `/`-separated form of a path
    fn match_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/")
    }

    /// resolve a pattern against the root
    fn absolute(&self, pattern: &str) -> PathBuf {
        self.root.join(pattern)
    }
}

/// whether a path component is a directory that's normally pruned
fn is_pruned_component(component: &Component<'_>) -> bool {
    match component {
        Component::Normal(name) => PRUNED_DIRS.iter().any(|dir| *name == *dir),
        _ => false,
    }
}

/// whether a file's extension is one the pattern allows
fn extension_allowed(path: &Path, extensions: &BTreeSet<String>) -> bool {
    extensions.is_empty()
        || path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| extensions.contains(e))
}

#[async_trait::async_trait]
impl ContentScanner for FsScanner {
    async fn scan(&self, sources: &[ContentSource], cancel: &CancelToken) -> Result<ScanOutcome> {
        let scanner = self.clone();
        let sources = sources.to_vec();
        let cancel = cancel.clone();

        tokio::task::spawn_blocking(move || scanner.scan_blocking(&sources, &cancel)).await?
    }
}
