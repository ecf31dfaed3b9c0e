//! The three Kinetic frameworks and their fixed vocabulary: axis
//! names and poles, the four styles of each framework, and the
//! colors and backgrounds used when a result is drawn.

use std::fmt;
use std::str::FromStr;

use anyhow::{Error, anyhow};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    Thinking,
    Managing,
    Leading,
}

/// A labeled scale with a pole at each end. Negative scores pull
/// toward `left`, positive toward `right`.
#[derive(Clone, Copy, Serialize, Debug, PartialEq)]
pub struct Axis {
    pub label: &'static str,
    pub left: &'static str,
    pub right: &'static str,
}

/// A named style and the accent color it is drawn with. `poles`
/// describes where the style sits on the two axes.
#[derive(Clone, Copy, Serialize, Debug, PartialEq)]
pub struct Style {
    pub name: &'static str,
    pub poles: &'static str,
    pub color: &'static str,
}

const ORANGE: &str = "#ff6f20";
const LIME: &str = "#bed600";
const PURPLE: &str = "#9f60b5";
const BLUE: &str = "#009ddb";

impl Framework {
    pub const ALL: [Framework; 3] = [Framework::Thinking, Framework::Managing, Framework::Leading];

    pub fn name(&self) -> &'static str {
        match self {
            Framework::Thinking => "thinking",
            Framework::Managing => "managing",
            Framework::Leading => "leading",
        }
    }

    pub fn display_label(&self) -> &'static str {
        match self {
            Framework::Thinking => "Kinetic Thinking Style",
            Framework::Managing => "Kinetic Managing Style",
            Framework::Leading => "Kinetic Leading Style",
        }
    }

    pub fn dim1(&self) -> Axis {
        match self {
            Framework::Thinking => Axis {
                label: "Uncertainty",
                left: "Reason",
                right: "Play",
            },
            Framework::Managing => Axis {
                label: "Process",
                left: "Control",
                right: "Enable",
            },
            Framework::Leading => Axis {
                label: "Ecosystem",
                left: "Transact",
                right: "Collaborate",
            },
        }
    }

    pub fn dim2(&self) -> Axis {
        match self {
            Framework::Thinking => Axis {
                label: "Possibility",
                left: "Structure",
                right: "Openness",
            },
            Framework::Managing => Axis {
                label: "Performance",
                left: "Productivity",
                right: "Learning",
            },
            Framework::Leading => Axis {
                label: "Time",
                left: "Present",
                right: "Future",
            },
        }
    }

    /// The four styles in quadrant order: left/left, right/left,
    /// left/right, right/right.
    pub fn styles(&self) -> [Style; 4] {
        match self {
            Framework::Thinking => [
                Style { name: "Focused", poles: "reason+structure", color: ORANGE },
                Style { name: "Playful", poles: "play+structure", color: LIME },
                Style { name: "Incremental", poles: "reason+openness", color: PURPLE },
                Style { name: "Breakaway", poles: "play+openness", color: BLUE },
            ],
            Framework::Managing => [
                Style { name: "Efficient", poles: "control+productivity", color: ORANGE },
                Style { name: "Supportive", poles: "enable+productivity", color: LIME },
                Style { name: "Inquisitive", poles: "control+learning", color: PURPLE },
                Style { name: "Venturing", poles: "enable+learning", color: BLUE },
            ],
            Framework::Leading => [
                Style { name: "Troubleshooter", poles: "transact+present", color: ORANGE },
                Style { name: "Co-creator", poles: "collaborate+present", color: LIME },
                Style { name: "Challenger", poles: "transact+future", color: PURPLE },
                Style { name: "Transformer", poles: "collaborate+future", color: BLUE },
            ],
        }
    }

    pub fn has_style(&self, style: &str) -> bool {
        self.styles().iter().any(|s| s.name == style)
    }

    pub fn default_color(&self) -> &'static str {
        ORANGE
    }

    /// Color for `style`, or the framework default when the style is
    /// not one of its four.
    pub fn style_color(&self, style: &str) -> &'static str {
        self.styles()
            .iter()
            .find(|s| s.name == style)
            .map(|s| s.color)
            .unwrap_or_else(|| self.default_color())
    }

    pub fn background(&self) -> &'static str {
        match self {
            Framework::Thinking => "/images/thinking-background.png",
            Framework::Managing => "/images/managing-background.png",
            Framework::Leading => "/images/leading-background.png",
        }
    }

    /// Resolve a framework name coming from an untrusted payload,
    /// falling back to `Thinking` for anything unrecognized.
    pub fn lookup_or_default(name: &str) -> Framework {
        name.parse().unwrap_or(Framework::Thinking)
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Framework {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "thinking" => Ok(Framework::Thinking),
            "managing" => Ok(Framework::Managing),
            "leading" => Ok(Framework::Leading),
            _ => Err(anyhow!("Unknown framework: {}", s)),
        }
    }
}

/// Accent color for a framework/style pair as found in a marker.
pub fn accent_color(framework: &str, style: &str) -> &'static str {
    Framework::lookup_or_default(framework).style_color(style)
}
