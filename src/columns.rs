use std::fmt;

/// Case-insensitive header matching rule: a header matches when it contains
/// every keyword. This replaces the ad-hoc "name contains both 'Schedule'
/// and 'Name'" string probing that used to live inline in the handler.
#[derive(Debug, Clone)]
pub struct HeaderRule {
    keywords: Vec<String>,
}

impl HeaderRule {
    pub fn new(keywords: &[&str]) -> Self {
        HeaderRule {
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    /// True when the header contains every keyword, ignoring case.
    pub fn matches(&self, header: &str) -> bool {
        let header = header.to_lowercase();
        self.keywords.iter().all(|k| header.contains(k.as_str()))
    }

    /// Position of the first matching header, if any.
    pub fn find(&self, headers: &[String]) -> Option<usize> {
        headers.iter().position(|h| self.matches(h))
    }
}

impl fmt::Display for HeaderRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "contains [{}]", self.keywords.join(", "))
    }
}

/// One output column: its name in the download, the rule locating its source
/// column by header text, and the position to fall back to when no header
/// matches.
#[derive(Debug, Clone)]
pub struct ColumnSpec {
    pub output: String,
    pub source: HeaderRule,
    pub fallback: usize,
}

impl ColumnSpec {
    pub fn new(output: &str, source: HeaderRule, fallback: usize) -> Self {
        ColumnSpec {
            output: output.to_string(),
            source,
            fallback,
        }
    }
}

/// The named column mapping for one deployment.
///
/// The export this service was built around is misaligned: student names
/// arrive under the "Mobile Phone" header, grades under "Gender", and so on.
/// The mapping names that drift explicitly instead of hiding it in positional
/// literals scattered through the handler. Resolution is header-first, with
/// the configured position used only when no header matches.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    specs: Vec<ColumnSpec>,
}

/// A column spec resolved against a concrete header row.
#[derive(Debug, Clone)]
pub struct ResolvedColumn {
    pub output: String,
    pub index: usize,
    pub by_header: bool,
}

impl ColumnMap {
    pub fn new(specs: Vec<ColumnSpec>) -> Self {
        ColumnMap { specs }
    }

    /// The mapping for the current export layout.
    ///
    /// Fallback positions follow the latest observed revision of the export
    /// (largest index 19, so extraction needs at least 20 columns).
    pub fn default_layout() -> Self {
        ColumnMap::new(vec![
            ColumnSpec::new("Student", HeaderRule::new(&["mobile", "phone"]), 6),
            ColumnSpec::new("Grade", HeaderRule::new(&["gender"]), 15),
            ColumnSpec::new(
                "Photo Release",
                HeaderRule::new(&["authorized", "pickup"]),
                19,
            ),
            ColumnSpec::new("Parent Pickup", HeaderRule::new(&["parent", "pickup"]), 18),
        ])
    }

    pub fn specs(&self) -> &[ColumnSpec] {
        &self.specs
    }

    /// Resolve every output column against a header row.
    ///
    /// Columns whose rule matches a header use that position; the rest fall
    /// back to their configured index.
    pub fn resolve(&self, headers: &[String]) -> Vec<ResolvedColumn> {
        self.specs
            .iter()
            .map(|spec| match spec.source.find(headers) {
                Some(index) => {
                    log::debug!(
                        "column '{}' matched header '{}' at position {}",
                        spec.output,
                        headers[index],
                        index
                    );
                    ResolvedColumn {
                        output: spec.output.clone(),
                        index,
                        by_header: true,
                    }
                }
                None => {
                    log::debug!(
                        "column '{}' has no matching header ({}), falling back to position {}",
                        spec.output,
                        spec.source,
                        spec.fallback
                    );
                    ResolvedColumn {
                        output: spec.output.clone(),
                        index: spec.fallback,
                        by_header: false,
                    }
                }
            })
            .collect()
    }
}

impl Default for ColumnMap {
    fn default() -> Self {
        ColumnMap::default_layout()
    }
}

/// Sanity rule for the column the export keeps mangling ("Schedule NameÂ©"
/// and friends). Its absence does not stop processing, only earns a warning.
pub fn schedule_name_rule() -> HeaderRule {
    HeaderRule::new(&["schedule", "name"])
}
