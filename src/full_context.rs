//! Open JTalk full-context labels.
//!
//! A label is one whitespace-free line such as
//!
//! ```text
//! xx^sil-k+o=N/A:-2+1+3/B:xx-xx_xx/C:09_xx+xx/D:xx+xx_xx/E:xx_xx!xx_xx-xx/F:3_3#0_xx@1_1|1_3/G:xx_xx%xx_xx_xx/H:xx_xx/I:1-3@1+1&1-1|1+3/J:xx_xx/K:1+1-3
//! ```
//!
//! where every field sits between two fixed separators. [`FullContextLabel`]
//! keeps each field under its conventional HTS name so that decoding and
//! re-encoding a label reproduces it byte for byte.

use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;

use crate::error::{LabelError, Result};

macro_rules! full_context_label {
    ($($sep:literal $field:ident),+ $(,)?) => {
        /// One decoded full-context label.
        ///
        /// * `p1`..`p5`: quinphone, `p3` being the current phoneme
        /// * `a*`: mora position inside the accent phrase
        /// * `b*`, `c*`, `d*`: part of speech of the previous, current and next word
        /// * `e*`, `f*`, `g*`: previous, current and next accent phrase
        /// * `h*`, `i*`, `j*`: previous, current and next breath group
        /// * `k*`: utterance size
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct FullContextLabel {
            $(pub $field: String,)+
        }

        impl FullContextLabel {
            /// Field names in label order, each paired with the separator written before it.
            pub const LAYOUT: &'static [(&'static str, &'static str)] =
                &[$((stringify!($field), $sep)),+];

            fn from_captures(captures: &regex::Captures<'_>) -> Self {
                Self {
                    $($field: captures[stringify!($field)].to_owned(),)+
                }
            }

            /// `(name, value)` pairs in label order.
            pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
                [$((stringify!($field), self.$field.as_str())),+].into_iter()
            }
        }
    };
}

full_context_label! {
    "" p1, "^" p2, "-" p3, "+" p4, "=" p5,
    "/A:" a1, "+" a2, "+" a3,
    "/B:" b1, "-" b2, "_" b3,
    "/C:" c1, "_" c2, "+" c3,
    "/D:" d1, "+" d2, "_" d3,
    "/E:" e1, "_" e2, "!" e3, "_" e4, "-" e5,
    "/F:" f1, "_" f2, "#" f3, "_" f4, "@" f5, "_" f6, "|" f7, "_" f8,
    "/G:" g1, "_" g2, "%" g3, "_" g4, "_" g5,
    "/H:" h1, "_" h2,
    "/I:" i1, "-" i2, "@" i3, "+" i4, "&" i5, "-" i6, "|" i7, "+" i8,
    "/J:" j1, "_" j2,
    "/K:" k1, "+" k2, "-" k3,
}

/// Field values never contain whitespace or `/`, so nothing can follow `k3`.
static LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    let body: String = FullContextLabel::LAYOUT
        .iter()
        .map(|(name, sep)| format!(r"{}(?P<{}>[^\s/]+?)", regex::escape(sep), name))
        .collect();
    Regex::new(&format!("^{body}$")).expect("full-context label pattern is valid")
});

impl FullContextLabel {
    pub fn decode(label: &str) -> Result<Self> {
        let captures = LABEL_RE.captures(label).ok_or_else(|| {
            LabelError::malformed(label, "does not match the full-context label layout")
        })?;
        Ok(Self::from_captures(&captures))
    }

    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// The phoneme this label describes.
    pub fn phoneme(&self) -> &str {
        &self.p3
    }

    pub fn previous_phoneme(&self) -> &str {
        &self.p2
    }

    pub fn next_phoneme(&self) -> &str {
        &self.p4
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }
}

impl FromStr for FullContextLabel {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

impl fmt::Display for FullContextLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ((_, sep), (_, value)) in Self::LAYOUT.iter().zip(self.fields()) {
            f.write_str(sep)?;
            f.write_str(value)?;
        }
        Ok(())
    }
}
