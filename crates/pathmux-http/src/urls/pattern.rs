//! Path template parsing and matching.
//!
//! This module provides [`PathPattern`], the compiled form of a route template
//! such as `/users/:id/files/:path*`. A template is literal text interleaved with
//! parameter tokens of three flavors:
//!
//! | Token      | Flavor                  | Matches                                   |
//! |------------|-------------------------|-------------------------------------------|
//! | `/:name`   | [`ParamFlavor::Required`] | exactly one non-empty segment           |
//! | `/:name*`  | [`ParamFlavor::Eager`]    | one or more segments, greedily          |
//! | `/:name?`  | [`ParamFlavor::Optional`] | one segment, or nothing at all          |
//!
//! A parameter name starts with an ASCII letter followed by letters, digits, or
//! underscores. Anything that is not a parameter token is copied into the regex
//! verbatim, so a malformed literal such as `/wrong/(path` fails compilation.

use std::collections::HashMap;
use std::fmt;

use regex::Regex;

use pathmux_core::{PathmuxError, PathmuxResult};

/// Parameter values extracted from a matched path, keyed by label.
pub type Params = HashMap<String, String>;

/// How many path segments a parameter may consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamFlavor {
    /// `:name` — a single, mandatory segment.
    Required,
    /// `:name*` — one or more segments; the value may contain `/`.
    Eager,
    /// `:name?` — a single segment whose leading separator and value may be absent.
    Optional,
}

impl ParamFlavor {
    const fn from_suffix(suffix: Option<u8>) -> Self {
        match suffix {
            Some(b'*') => Self::Eager,
            Some(b'?') => Self::Optional,
            _ => Self::Required,
        }
    }

    /// Returns the suffix character that selects this flavor in a template.
    pub const fn suffix(self) -> Option<char> {
        match self {
            Self::Required => None,
            Self::Eager => Some('*'),
            Self::Optional => Some('?'),
        }
    }

    /// Appends the regex fragment for a parameter of this flavor.
    ///
    /// Each fragment holds two capture groups: an outer one for the separator
    /// plus value, and an inner one, named after the label, for the bare value.
    fn push_sub_pattern(self, out: &mut String, label: &str) {
        match self {
            Self::Required => {
                out.push_str("(/(?P<");
                out.push_str(label);
                out.push_str(">[^/]+))");
            }
            Self::Eager => {
                out.push_str("(/(?P<");
                out.push_str(label);
                out.push_str(">[^/]+(?:/[^/]+)*))");
            }
            Self::Optional => {
                out.push_str("(/(?P<");
                out.push_str(label);
                out.push_str(">[^/]+))?");
            }
        }
    }
}

impl fmt::Display for ParamFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => write!(f, "required"),
            Self::Eager => write!(f, "eager"),
            Self::Optional => write!(f, "optional"),
        }
    }
}

/// A named parameter declared in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDescriptor {
    label: String,
    flavor: ParamFlavor,
}

impl ParamDescriptor {
    /// Returns the parameter label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the parameter flavor.
    pub const fn flavor(&self) -> ParamFlavor {
        self.flavor
    }
}

/// A parameter token found while scanning a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ParamToken<'t> {
    /// Byte offset of the leading `/`.
    start: usize,
    /// Byte offset just past the token, including any flavor suffix.
    end: usize,
    label: &'t str,
    flavor: ParamFlavor,
}

/// Scans a template left to right for `/:label` tokens with an optional
/// `*` or `?` suffix. Tokens never overlap.
fn scan_tokens(template: &str) -> Vec<ParamToken<'_>> {
    let bytes = template.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let is_token = bytes[i] == b'/'
            && bytes.get(i + 1) == Some(&b':')
            && bytes.get(i + 2).is_some_and(u8::is_ascii_alphabetic);
        if !is_token {
            i += 1;
            continue;
        }

        let label_start = i + 2;
        let mut end = label_start + 1;
        while bytes
            .get(end)
            .is_some_and(|b| b.is_ascii_alphanumeric() || *b == b'_')
        {
            end += 1;
        }
        let label = &template[label_start..end];

        let suffix = bytes.get(end).copied().filter(|b| matches!(b, b'*' | b'?'));
        let flavor = ParamFlavor::from_suffix(suffix);
        if suffix.is_some() {
            end += 1;
        }

        tokens.push(ParamToken {
            start: i,
            end,
            label,
            flavor,
        });
        i = end;
    }

    tokens
}

/// A compiled route template.
///
/// Holds the anchored regex and the parameters in the order they appear in the
/// template.
#[derive(Clone)]
pub struct PathPattern {
    /// The declared template (e.g. `"/users/:id"`)
    template: String,
    /// The compiled, anchored regex
    regex: Regex,
    /// Parameters in template order
    params: Vec<ParamDescriptor>,
}

impl fmt::Debug for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathPattern")
            .field("template", &self.template)
            .field("regex", &self.regex.as_str())
            .field("params", &self.params)
            .finish()
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.regex.as_str())
    }
}

/// The result of matching a path against a [`PathPattern`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch<'p> {
    /// The substring consumed by the whole pattern.
    pub span: &'p str,
    /// Extracted values; absent optional parameters map to `""`.
    pub values: Params,
}

impl PatternMatch<'_> {
    /// Counts the extracted values that are non-empty.
    pub fn non_empty_count(&self) -> usize {
        self.values.values().filter(|v| !v.is_empty()).count()
    }
}

impl PathPattern {
    /// Compiles a template into an anchored pattern.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathmux_http::urls::pattern::{ParamFlavor, PathPattern};
    ///
    /// let pattern = PathPattern::compile("/files/:dir*/:name").unwrap();
    /// assert_eq!(pattern.params()[0].flavor(), ParamFlavor::Eager);
    ///
    /// let m = pattern.captures("/files/a/b/c.txt").unwrap();
    /// assert_eq!(m.values["dir"], "a/b");
    /// assert_eq!(m.values["name"], "c.txt");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`PathmuxError::DuplicateParameterName`] if a label repeats, or
    /// [`PathmuxError::InvalidPattern`] if the resulting regex does not compile.
    pub fn compile(template: &str) -> PathmuxResult<Self> {
        let tokens = scan_tokens(template);
        let mut regex_str = String::with_capacity(template.len() + 2 + tokens.len() * 24);
        let mut params: Vec<ParamDescriptor> = Vec::with_capacity(tokens.len());
        let mut literal_start = 0;

        regex_str.push('^');
        for token in tokens {
            if params.iter().any(|p| p.label == token.label) {
                return Err(PathmuxError::DuplicateParameterName {
                    template: template.to_string(),
                    label: token.label.to_string(),
                });
            }

            regex_str.push_str(&template[literal_start..token.start]);
            token.flavor.push_sub_pattern(&mut regex_str, token.label);
            params.push(ParamDescriptor {
                label: token.label.to_string(),
                flavor: token.flavor,
            });
            literal_start = token.end;
        }
        regex_str.push_str(&template[literal_start..]);
        regex_str.push('$');

        let regex = Regex::new(&regex_str).map_err(|e| PathmuxError::InvalidPattern {
            template: template.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            template: template.to_string(),
            regex,
            params,
        })
    }

    /// Returns the declared template.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Returns the compiled regex.
    pub const fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Returns the parameters in template order.
    pub fn params(&self) -> &[ParamDescriptor] {
        &self.params
    }

    /// Returns `true` if the template declares no parameters.
    pub fn is_literal(&self) -> bool {
        self.params.is_empty()
    }

    /// Matches `path` against the pattern and extracts parameter values.
    ///
    /// Values are read from the inner, label-named group of each parameter, so
    /// capture groups typed into the template's literal text cannot shift them.
    pub fn captures<'p>(&self, path: &'p str) -> Option<PatternMatch<'p>> {
        let caps = self.regex.captures(path)?;
        let span = caps.get(0)?.as_str();

        let values = self
            .params
            .iter()
            .map(|p| {
                let value = caps.name(&p.label).map_or("", |m| m.as_str());
                (p.label.clone(), value.to_string())
            })
            .collect();

        Some(PatternMatch { span, values })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group_count(p: &PathPattern) -> usize {
        p.regex().captures_len() - 1
    }

    #[test]
    fn test_literal_template() {
        let p = PathPattern::compile("/simple/path").unwrap();
        assert_eq!(p.regex().as_str(), "^/simple/path$");
        assert!(p.is_literal());
        assert_eq!(group_count(&p), 0);
        assert!(p.captures("/simple/path").is_some());
        assert!(p.captures("/simple/path/more").is_none());
        assert!(p.captures("/prefix/simple/path").is_none());
    }

    #[test]
    fn test_invalid_literal() {
        let err = PathPattern::compile("/wrong/(path").unwrap_err();
        assert!(matches!(err, PathmuxError::InvalidPattern { .. }));
    }

    #[test]
    fn test_duplicate_parameter() {
        let err = PathPattern::compile("/two/identical/:label/:label/path").unwrap_err();
        match err {
            PathmuxError::DuplicateParameterName { label, .. } => assert_eq!(label, "label"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_parameter_across_flavors() {
        assert!(PathPattern::compile("/a/:x/:x?").is_err());
        assert!(PathPattern::compile("/a/:x*/b/:x").is_err());
    }

    #[test]
    fn test_required_params_regex() {
        let p = PathPattern::compile("/some/path/:with/two/:params").unwrap();
        assert_eq!(
            p.regex().as_str(),
            "^/some/path(/(?P<with>[^/]+))/two(/(?P<params>[^/]+))$"
        );
        assert_eq!(p.params().len(), 2);
        assert_eq!(group_count(&p), 4);
    }

    #[test]
    fn test_eager_param_regex() {
        let p = PathPattern::compile("/some/path/:with/:eager*/param").unwrap();
        assert_eq!(
            p.regex().as_str(),
            "^/some/path(/(?P<with>[^/]+))(/(?P<eager>[^/]+(?:/[^/]+)*))/param$"
        );
        assert_eq!(p.params()[1].flavor(), ParamFlavor::Eager);
    }

    #[test]
    fn test_optional_param_regex() {
        let p = PathPattern::compile("/some/path/:with/:optional?/param").unwrap();
        assert_eq!(
            p.regex().as_str(),
            "^/some/path(/(?P<with>[^/]+))(/(?P<optional>[^/]+))?/param$"
        );
        assert_eq!(p.params()[1].flavor(), ParamFlavor::Optional);
    }

    #[test]
    fn test_params_keep_template_order() {
        let p = PathPattern::compile("/:zeta/:alpha*/:mid?").unwrap();
        let labels: Vec<&str> = p.params().iter().map(ParamDescriptor::label).collect();
        assert_eq!(labels, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_extract_required() {
        let p = PathPattern::compile("/a/:x/b/:y").unwrap();
        let m = p.captures("/a/1/b/2").unwrap();
        assert_eq!(m.span, "/a/1/b/2");
        assert_eq!(m.values["x"], "1");
        assert_eq!(m.values["y"], "2");
        assert!(p.captures("/a//b/2").is_none());
    }

    #[test]
    fn test_extract_eager() {
        let p = PathPattern::compile("/a/:x*/b").unwrap();
        let m = p.captures("/a/1/2/3/b").unwrap();
        assert_eq!(m.values["x"], "1/2/3");
        assert_eq!(p.captures("/a/1/b").unwrap().values["x"], "1");
        assert!(p.captures("/a/b").is_none());
    }

    #[test]
    fn test_extract_optional() {
        let p = PathPattern::compile("/a/:x/:y?/b").unwrap();

        let m = p.captures("/a/1/b").unwrap();
        assert_eq!(m.values["x"], "1");
        assert_eq!(m.values["y"], "");
        assert_eq!(m.non_empty_count(), 1);

        let m = p.captures("/a/1/2/b").unwrap();
        assert_eq!(m.values["x"], "1");
        assert_eq!(m.values["y"], "2");
        assert_eq!(m.non_empty_count(), 2);
    }

    #[test]
    fn test_trailing_optional() {
        let p = PathPattern::compile("/items/:id?").unwrap();
        assert_eq!(p.captures("/items").unwrap().values["id"], "");
        assert_eq!(p.captures("/items/7").unwrap().values["id"], "7");
    }

    #[test]
    fn test_literal_groups_do_not_shift_extraction() {
        let p = PathPattern::compile("/(v1|v2)/:x/:y").unwrap();
        let m = p.captures("/v2/a/b").unwrap();
        assert_eq!(m.values["x"], "a");
        assert_eq!(m.values["y"], "b");
    }

    #[test]
    fn test_prefix_labels_are_distinct_tokens() {
        let p = PathPattern::compile("/:a/:ab").unwrap();
        let m = p.captures("/1/2").unwrap();
        assert_eq!(m.values["a"], "1");
        assert_eq!(m.values["ab"], "2");
    }

    #[test]
    fn test_digit_leading_identifier_is_literal() {
        let p = PathPattern::compile("/a/:1abc").unwrap();
        assert!(p.is_literal());
        assert!(p.captures("/a/:1abc").is_some());
    }

    #[test]
    fn test_suffix_only_directly_after_identifier() {
        let p = PathPattern::compile("/a/:x-?").unwrap();
        assert_eq!(p.params()[0].flavor(), ParamFlavor::Required);
        assert_eq!(p.regex().as_str(), "^/a(/(?P<x>[^/]+))-?$");
    }

    #[test]
    fn test_identifier_with_digits_and_underscore() {
        let p = PathPattern::compile("/:user_id2").unwrap();
        assert_eq!(p.params()[0].label(), "user_id2");
    }

    #[test]
    fn test_colon_without_separator_is_literal() {
        let p = PathPattern::compile("/a:x").unwrap();
        assert!(p.is_literal());
    }

    #[test]
    fn test_scan_tokens_offsets() {
        let tokens = scan_tokens("/a/:x*/:y?");
        assert_eq!(tokens.len(), 2);
        assert_eq!((tokens[0].start, tokens[0].end), (2, 6));
        assert_eq!(tokens[0].flavor, ParamFlavor::Eager);
        assert_eq!((tokens[1].start, tokens[1].end), (6, 10));
        assert_eq!(tokens[1].flavor, ParamFlavor::Optional);
    }

    #[test]
    fn test_flavor_suffix_and_display() {
        assert_eq!(ParamFlavor::Required.suffix(), None);
        assert_eq!(ParamFlavor::Eager.suffix(), Some('*'));
        assert_eq!(ParamFlavor::Optional.to_string(), "optional");
    }

    #[test]
    fn test_pattern_display_and_debug() {
        let p = PathPattern::compile("/users/:id").unwrap();
        assert_eq!(p.to_string(), "^/users(/(?P<id>[^/]+))$");
        assert!(format!("{p:?}").contains("/users/:id"));
        assert_eq!(p.template(), "/users/:id");
    }
}
