//! Glob pattern matching for ignore/include rules
//!
//! Supports the overlapping rule dialects accepted in ignore lists:
//! - plain globs tested against the whole path and its basename, where `*`
//!   and `?` also cross `/`
//! - trailing-slash directory rules (`build/` covers `build` and everything
//!   under it)
//! - recursive `**` rules, where `*` and `?` stay within one path segment
//! - bare names matching any individual path segment at any depth
//!
//! A path is excluded when ANY dialect of ANY rule matches; there is no
//! precedence and no negation. One canonical glob-to-regex translation is
//! shared by every dialect. A pattern whose translation fails to compile
//! (an inverted class range, say) is skipped with a warning and never
//! matches anything.

use regex::Regex;

use crate::core::log::Reporter;
use crate::core::paths::normalize_match_path;

/// Translate a glob pattern into an anchored regex.
///
/// With `segment_wildcards`, `**` crosses separators while `*` and `?` stay
/// within a single segment. Without it, `*` and `?` match anything including
/// `/` (fnmatch behavior). `[seq]` and `[!seq]` classes are supported; an
/// unterminated `[` is literal. Everything else is escaped.
pub fn glob_to_regex(pattern: &str, segment_wildcards: bool) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut regex = String::with_capacity(pattern.len() * 2 + 8);
    regex.push_str("(?s)^");

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match c {
            '*' => {
                if segment_wildcards {
                    if chars.get(i + 1) == Some(&'*') {
                        regex.push_str(".*");
                        i += 1;
                    } else {
                        regex.push_str("[^/]*");
                    }
                } else {
                    regex.push_str(".*");
                }
            }
            '?' => regex.push_str(if segment_wildcards { "[^/]" } else { "." }),
            '[' => {
                // Scan for the closing bracket; a leading ! or ] is part of
                // the class body.
                let mut j = i + 1;
                if chars.get(j) == Some(&'!') {
                    j += 1;
                }
                if chars.get(j) == Some(&']') {
                    j += 1;
                }
                while j < chars.len() && chars[j] != ']' {
                    j += 1;
                }
                if j >= chars.len() {
                    regex.push_str("\\[");
                } else {
                    let body: String = chars[i + 1..j].iter().collect();
                    regex.push_str(&class_to_regex(&body));
                    i = j;
                }
            }
            _ => push_literal(&mut regex, c),
        }
        i += 1;
    }

    regex.push('$');
    regex
}

/// Render a `[...]` class body as a regex class, keeping ranges intact
fn class_to_regex(body: &str) -> String {
    let mut inner = body.replace('\\', "\\\\");
    for op in ['&', '~', '|'] {
        inner = inner.replace(op, &format!("\\{}", op));
    }

    let inner = match inner.strip_prefix('!') {
        Some(rest) => format!("^{}", rest),
        None => {
            if inner.starts_with('^') || inner.starts_with('[') {
                format!("\\{}", inner)
            } else {
                inner
            }
        }
    };
    format!("[{}]", inner)
}

fn push_literal(regex: &mut String, c: char) {
    if matches!(
        c,
        '\\' | '.' | '+' | '(' | ')' | '|' | '{' | '}' | '^' | '$' | '#' | '&' | '-' | '~' | ']'
    ) {
        regex.push('\\');
    }
    regex.push(c);
}

fn compile(pattern: &str, segment_wildcards: bool) -> Option<Regex> {
    Regex::new(&glob_to_regex(pattern, segment_wildcards)).ok()
}

/// One ignore pattern with its dialect regexes precompiled
#[derive(Debug)]
struct FilterRule {
    /// fnmatch dialect over the whole pattern (path and basename checks)
    glob: Option<Regex>,
    /// for `dir/` rules: the pattern minus its trailing slash
    dir_stem: Option<Regex>,
    /// for `dir/` rules: the stripped pattern plus `/**`
    dir_subtree: Option<Regex>,
    /// segment dialect, present when the pattern contains `**`
    deep: Option<Regex>,
    /// the pattern minus all trailing slashes, for segment-alone checks;
    /// None when identical to `glob`
    segment: Option<Regex>,
}

impl FilterRule {
    fn new(pattern: &str, reporter: Reporter) -> Self {
        let glob = compile(pattern, false);
        // the dialects differ only in wildcard expansion, so a pattern that
        // fails here fails in all of them
        if glob.is_none() {
            reporter.warn(&format!("Skipping unusable pattern: {}", pattern));
        }

        let (dir_stem, dir_subtree) = match pattern.strip_suffix('/') {
            Some(stem) => (
                compile(stem, false),
                compile(&format!("{}/**", stem), false),
            ),
            None => (None, None),
        };

        let deep = if pattern.contains("**") {
            compile(pattern, true)
        } else {
            None
        };

        let stripped = pattern.trim_end_matches('/');
        let segment = if stripped == pattern {
            None
        } else {
            compile(stripped, false)
        };

        Self {
            glob,
            dir_stem,
            dir_subtree,
            deep,
            segment,
        }
    }

    fn matches(&self, path: &str, basename: &str, segments: &[&str]) -> bool {
        // 1. whole path or basename as a plain glob
        if let Some(re) = &self.glob {
            if re.is_match(path) || re.is_match(basename) {
                return true;
            }
        }

        // 2. trailing-slash directory rule: the directory itself or its
        // whole subtree
        if let Some(re) = &self.dir_stem {
            if re.is_match(path) {
                return true;
            }
        }
        if let Some(re) = &self.dir_subtree {
            if re.is_match(path) {
                return true;
            }
        }

        // 3. recursive wildcard rule over the whole path
        if let Some(re) = &self.deep {
            if re.is_match(path) {
                return true;
            }
        }

        // 4. any prefix subpath, or any non-leading segment on its own
        let mut prefix = String::with_capacity(path.len());
        for (i, seg) in segments.iter().enumerate() {
            if i > 0 {
                prefix.push('/');
            }
            prefix.push_str(seg);
            if let Some(re) = &self.glob {
                if re.is_match(&prefix) {
                    return true;
                }
            }
            if i > 0 {
                if let Some(re) = self.segment.as_ref().or(self.glob.as_ref()) {
                    if re.is_match(seg) {
                        return true;
                    }
                }
            }
        }

        false
    }
}

/// An ordered set of ignore rules
#[derive(Debug)]
pub struct PatternSet {
    rules: Vec<FilterRule>,
}

impl PatternSet {
    pub fn new(patterns: &[String], reporter: Reporter) -> Self {
        Self {
            rules: patterns
                .iter()
                .map(|p| FilterRule::new(p, reporter))
                .collect(),
        }
    }

    /// True when any rule matches the path in any dialect.
    ///
    /// Directories and files are tested identically; the caller decides what
    /// a match means (prune vs. skip).
    pub fn matches(&self, path: &str) -> bool {
        let normalized = normalize_match_path(path);
        if normalized.is_empty() {
            return false;
        }
        let basename = normalized.rsplit('/').next().unwrap_or(&normalized);
        let segments: Vec<&str> = normalized.split('/').collect();

        self.rules
            .iter()
            .any(|rule| rule.matches(&normalized, basename, &segments))
    }
}

/// Include patterns: when non-empty, only matching paths survive
#[derive(Debug)]
pub struct IncludeSet {
    rules: Vec<Regex>,
}

impl IncludeSet {
    pub fn new(patterns: &[String], reporter: Reporter) -> Self {
        let rules = patterns
            .iter()
            .filter_map(|p| {
                let re = compile(p, false);
                if re.is_none() {
                    reporter.warn(&format!("Skipping unusable pattern: {}", p));
                }
                re
            })
            .collect();
        Self { rules }
    }

    /// True when the set is empty, or the path or its basename matches any
    /// include pattern as a plain glob.
    pub fn should_include(&self, path: &str) -> bool {
        if self.rules.is_empty() {
            return true;
        }
        let normalized = normalize_match_path(path);
        let basename = normalized.rsplit('/').next().unwrap_or(&normalized);

        self.rules
            .iter()
            .any(|re| re.is_match(&normalized) || re.is_match(basename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(patterns: &[&str]) -> PatternSet {
        PatternSet::new(
            &patterns.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
            Reporter::default(),
        )
    }

    fn includes(patterns: &[&str]) -> IncludeSet {
        IncludeSet::new(
            &patterns.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
            Reporter::default(),
        )
    }

    #[test]
    fn test_translate_plain_glob() {
        assert_eq!(glob_to_regex("*.py", false), r"(?s)^.*\.py$");
        assert_eq!(glob_to_regex("a?c", false), r"(?s)^a.c$");
    }

    #[test]
    fn test_translate_segment_dialect() {
        assert_eq!(glob_to_regex("**/build/**", true), r"(?s)^.*/build/.*$");
        assert_eq!(glob_to_regex("src/*.py", true), r"(?s)^src/[^/]*\.py$");
        assert_eq!(glob_to_regex("a?c", true), r"(?s)^a[^/]c$");
    }

    #[test]
    fn test_translate_escapes_metacharacters() {
        let re = Regex::new(&glob_to_regex("a+b(c).txt", false)).unwrap();
        assert!(re.is_match("a+b(c).txt"));
        assert!(!re.is_match("aab(c)xtxt"));
    }

    #[test]
    fn test_translate_character_classes() {
        let re = Regex::new(&glob_to_regex("[abc].txt", false)).unwrap();
        assert!(re.is_match("a.txt"));
        assert!(re.is_match("c.txt"));
        assert!(!re.is_match("d.txt"));

        let negated = Regex::new(&glob_to_regex("[!a].txt", false)).unwrap();
        assert!(negated.is_match("b.txt"));
        assert!(!negated.is_match("a.txt"));

        let range = Regex::new(&glob_to_regex("v[0-9].log", false)).unwrap();
        assert!(range.is_match("v7.log"));
        assert!(!range.is_match("vx.log"));
    }

    #[test]
    fn test_translate_unterminated_class_is_literal() {
        let re = Regex::new(&glob_to_regex("f[oo", false)).unwrap();
        assert!(re.is_match("f[oo"));
        assert!(!re.is_match("fo"));
    }

    #[test]
    fn test_inverted_class_range_does_not_compile() {
        // the one translation the regex engine rejects
        assert!(Regex::new(&glob_to_regex("[z-a].txt", false)).is_err());
    }

    #[test]
    fn test_unusable_pattern_never_matches() {
        let rules = set(&["[z-a].txt", "*.log"]);
        assert!(!rules.matches("b.txt"));
        assert!(!rules.matches("z.txt"));
        // the surviving rules still apply
        assert!(rules.matches("run.log"));
    }

    #[test]
    fn test_unusable_include_pattern_is_dropped() {
        let inc = includes(&["[z-a].txt", "*.py"]);
        assert!(inc.should_include("main.py"));
        assert!(!inc.should_include("z.txt"));
    }

    #[test]
    fn test_basename_glob() {
        let rules = set(&["*.pyc"]);
        assert!(rules.matches("x.pyc"));
        assert!(rules.matches("deep/nested/x.pyc"));
        assert!(!rules.matches("x.py"));
    }

    #[test]
    fn test_plain_glob_star_crosses_separators() {
        // fnmatch dialect: * is not segment-bound
        let rules = set(&["src*cache"]);
        assert!(rules.matches("src/sub/cache"));
    }

    #[test]
    fn test_trailing_slash_matches_dir_and_subtree() {
        let rules = set(&["node_modules/"]);
        assert!(rules.matches("node_modules"));
        assert!(rules.matches("node_modules/left-pad/index.js"));
        assert!(!rules.matches("node_modules_backup"));
    }

    #[test]
    fn test_bare_directory_name_matches_at_depth() {
        let rules = set(&["__pycache__/"]);
        assert!(rules.matches("src/__pycache__"));
        assert!(rules.matches("src/__pycache__/mod.pyc"));
        assert!(!rules.matches("src/main.py"));
    }

    #[test]
    fn test_recursive_wildcard_rule() {
        let rules = set(&["**/.git/**"]);
        assert!(rules.matches("a/.git/config"));
        assert!(rules.matches("a/b/c/.git/hooks/pre-commit"));
        assert!(!rules.matches("a/gitconfig"));
    }

    #[test]
    fn test_segment_wildcard_stays_in_segment() {
        let re = Regex::new(&glob_to_regex("src/*.py", true)).unwrap();
        assert!(re.is_match("src/main.py"));
        assert!(!re.is_match("src/sub/main.py"));
    }

    #[test]
    fn test_prefix_subpath_match() {
        // a root-level name excludes its whole subtree via prefix checks
        let rules = set(&["build"]);
        assert!(rules.matches("build"));
        assert!(rules.matches("build/out/a.o"));
    }

    #[test]
    fn test_order_independence() {
        let forward = set(&["*.log", "node_modules/", "**/dist/**"]);
        let backward = set(&["**/dist/**", "node_modules/", "*.log"]);
        for path in [
            "a.log",
            "node_modules/x.js",
            "web/dist/bundle.js",
            "src/main.rs",
            "logs/a.txt",
        ] {
            assert_eq!(forward.matches(path), backward.matches(path), "{}", path);
        }
    }

    #[test]
    fn test_matches_is_idempotent() {
        let rules = set(&["venv/", "*.tmp"]);
        for path in ["venv/bin/python", "scratch.tmp", "src/lib.rs"] {
            assert_eq!(rules.matches(path), rules.matches(path));
        }
    }

    #[test]
    fn test_path_normalized_before_matching() {
        let rules = set(&["node_modules/"]);
        assert!(rules.matches("./node_modules/x.js"));
        assert!(rules.matches("node_modules\\x.js"));
    }

    #[test]
    fn test_empty_pattern_set() {
        let rules = set(&[]);
        assert!(!rules.matches("anything/at/all.txt"));
    }

    #[test]
    fn test_include_empty_means_everything() {
        let inc = includes(&[]);
        assert!(inc.should_include("src/main.rs"));
        assert!(inc.should_include("whatever.bin"));
    }

    #[test]
    fn test_include_filters_by_glob() {
        let inc = includes(&["*.py"]);
        assert!(inc.should_include("main.py"));
        assert!(inc.should_include("src/deep/util.py"));
        assert!(!inc.should_include("main.rs"));
    }

    #[test]
    fn test_include_full_path_pattern() {
        let inc = includes(&["src/*"]);
        assert!(inc.should_include("src/main.rs"));
        assert!(!inc.should_include("docs/guide.md"));
    }
}
