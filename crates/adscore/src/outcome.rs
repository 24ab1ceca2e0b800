//! Result codes a signature can attest to.

use serde::Serialize;

/// Verdict attached to a verified signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Ok,
    Junk,
    Proxy,
    Bot,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Ok => "ok",
            Verdict::Junk => "junk",
            Verdict::Proxy => "proxy",
            Verdict::Bot => "bot",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A result code, its display name and the verdict it maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub code: u8,
    pub name: &'static str,
    pub verdict: Verdict,
}

/// All outcomes, in the order they are tried during verification. The order
/// is fixed so that resolution is deterministic.
pub static OUTCOMES: [Outcome; 4] = [
    Outcome {
        code: 0,
        name: "Clean",
        verdict: Verdict::Ok,
    },
    Outcome {
        code: 3,
        name: "Junk",
        verdict: Verdict::Junk,
    },
    Outcome {
        code: 6,
        name: "Proxy",
        verdict: Verdict::Proxy,
    },
    Outcome {
        code: 9,
        name: "Bot",
        verdict: Verdict::Bot,
    },
];
