//! Decoded level model
//!
//! Typed records for every category, validated while decoding the classified
//! shapes. Geometry and color fields stay the verbatim attribute text; the
//! level format copies them through without arithmetic.

use crate::classify::{classify, CategorizedShapes};
use crate::element::{RectElement, TextElement};
use crate::error::{LevelError, Result};
use crate::parser::SvgDocument;
use crate::script::ScriptRef;
use crate::style::color_of_style;

/// Level background
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackgroundRecord {
    /// Fill color, six hex digits
    pub color: String,
}

/// Player spawn point
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerRecord {
    /// X coordinate
    pub x: String,
    /// Y coordinate
    pub y: String,
    /// Fill color, six hex digits
    pub color: String,
    /// Attached script, if the shape carries a command line child
    pub script: Option<ScriptRef>,
}

/// Solid platform, lava region or decorative back platform
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformRecord {
    /// X coordinate
    pub x: String,
    /// Y coordinate
    pub y: String,
    /// Width
    pub width: String,
    /// Height
    pub height: String,
    /// Fill color, six hex digits
    pub color: String,
}

/// Goal marker
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalRecord {
    /// Full shape id, prefix included (`goal3`)
    pub id: String,
    /// X coordinate
    pub x: String,
    /// Y coordinate
    pub y: String,
    /// Fill color, six hex digits
    pub color: String,
}

/// Pushable box
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoxRecord {
    /// Full shape id, prefix included
    pub id: String,
    /// X coordinate
    pub x: String,
    /// Y coordinate
    pub y: String,
    /// Width
    pub width: String,
    /// Height
    pub height: String,
    /// Fill color, six hex digits
    pub color: String,
}

/// On-screen label
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelRecord {
    /// Full shape id, prefix included
    pub id: String,
    /// X coordinate
    pub x: String,
    /// Y coordinate
    pub y: String,
    /// Fill color, six hex digits
    pub color: String,
    /// Label body: the text span children joined with single spaces
    pub text: String,
}

/// Scripted trigger region
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptRegionRecord {
    /// X coordinate
    pub x: String,
    /// Y coordinate
    pub y: String,
    /// Width
    pub width: String,
    /// Height
    pub height: String,
    /// Fill color, six hex digits
    pub color: String,
    /// The script the region triggers
    pub script: ScriptRef,
}

/// The decoded level, ready for serialization
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Level {
    /// Level background
    pub background: BackgroundRecord,
    /// Player spawn point
    pub player: PlayerRecord,
    /// Solid platforms
    pub platforms: Vec<PlatformRecord>,
    /// Goal markers
    pub goals: Vec<GoalRecord>,
    /// Lava regions
    pub lavas: Vec<PlatformRecord>,
    /// Decorative back platforms
    pub back_platforms: Vec<PlatformRecord>,
    /// Pushable boxes
    pub boxes: Vec<BoxRecord>,
    /// On-screen labels
    pub labels: Vec<LabelRecord>,
    /// Scripted trigger regions
    pub script_regions: Vec<ScriptRegionRecord>,
}

impl Level {
    /// Classify and decode a parsed document into the level model
    ///
    /// # Errors
    ///
    /// Returns an error if the document lacks a required singleton shape,
    /// any shape lacks a required attribute or fill color, or a script
    /// region carries no usable command line child.
    pub fn from_document(doc: &SvgDocument) -> Result<Self> {
        let shapes = classify(doc)?;
        Self::from_shapes(&shapes)
    }

    fn from_shapes(shapes: &CategorizedShapes<'_>) -> Result<Self> {
        let background = BackgroundRecord {
            color: rect_color(shapes.background)?,
        };
        let player = PlayerRecord {
            x: shapes.player.require("x")?.to_string(),
            y: shapes.player.require("y")?.to_string(),
            color: rect_color(shapes.player)?,
            script: optional_script(shapes.player)?,
        };
        let platforms = decode_all(&shapes.platforms, decode_platform)?;
        let goals = decode_all(&shapes.goals, decode_goal)?;
        let lavas = decode_all(&shapes.lavas, decode_platform)?;
        let back_platforms = decode_all(&shapes.back_platforms, decode_platform)?;
        let boxes = decode_all(&shapes.boxes, decode_box)?;
        let labels = decode_all(&shapes.labels, decode_label)?;
        let script_regions = decode_all(&shapes.script_regions, decode_script_region)?;

        Ok(Self {
            background,
            player,
            platforms,
            goals,
            lavas,
            back_platforms,
            boxes,
            labels,
            script_regions,
        })
    }
}

/// Decode every shape of one category, aborting on the first failure
fn decode_all<E, R>(shapes: &[&E], decode: impl Fn(&E) -> Result<R>) -> Result<Vec<R>> {
    shapes.iter().map(|shape| decode(shape)).collect()
}

/// Fill color of a rectangle, decoded from its style attribute
fn rect_color(rect: &RectElement) -> Result<String> {
    let style = rect.require("style")?;
    color_of_style(style)
        .map(str::to_string)
        .ok_or_else(|| LevelError::MalformedStyle {
            shape: rect.id_or_anon().to_string(),
        })
}

/// Fill color of a text element, decoded from its style attribute
fn text_color(elem: &TextElement) -> Result<String> {
    let style = elem.require("style")?;
    color_of_style(style)
        .map(str::to_string)
        .ok_or_else(|| LevelError::MalformedStyle {
            shape: elem.id_or_anon().to_string(),
        })
}

/// The command line child of a script-carrying shape, if present
///
/// A single child whose text holds no tokens counts as no script at all.
fn optional_script(rect: &RectElement) -> Result<Option<ScriptRef>> {
    if rect.children.len() > 1 {
        return Err(LevelError::MultipleScriptChildren {
            shape: rect.id_or_anon().to_string(),
        });
    }
    Ok(rect
        .children
        .first()
        .and_then(|text| ScriptRef::from_command_line(text)))
}

/// The command line child of a shape that must carry one
fn required_script(rect: &RectElement) -> Result<ScriptRef> {
    optional_script(rect)?.ok_or_else(|| LevelError::MissingScriptChild {
        shape: rect.id_or_anon().to_string(),
    })
}

fn decode_platform(rect: &RectElement) -> Result<PlatformRecord> {
    Ok(PlatformRecord {
        x: rect.require("x")?.to_string(),
        y: rect.require("y")?.to_string(),
        width: rect.require("width")?.to_string(),
        height: rect.require("height")?.to_string(),
        color: rect_color(rect)?,
    })
}

fn decode_goal(rect: &RectElement) -> Result<GoalRecord> {
    Ok(GoalRecord {
        id: rect.require("id")?.to_string(),
        x: rect.require("x")?.to_string(),
        y: rect.require("y")?.to_string(),
        color: rect_color(rect)?,
    })
}

fn decode_box(rect: &RectElement) -> Result<BoxRecord> {
    Ok(BoxRecord {
        id: rect.require("id")?.to_string(),
        x: rect.require("x")?.to_string(),
        y: rect.require("y")?.to_string(),
        width: rect.require("width")?.to_string(),
        height: rect.require("height")?.to_string(),
        color: rect_color(rect)?,
    })
}

fn decode_label(elem: &TextElement) -> Result<LabelRecord> {
    Ok(LabelRecord {
        id: elem.require("id")?.to_string(),
        x: elem.require("x")?.to_string(),
        y: elem.require("y")?.to_string(),
        color: text_color(elem)?,
        text: elem.children.join(" "),
    })
}

fn decode_script_region(rect: &RectElement) -> Result<ScriptRegionRecord> {
    Ok(ScriptRegionRecord {
        x: rect.require("x")?.to_string(),
        y: rect.require("y")?.to_string(),
        width: rect.require("width")?.to_string(),
        height: rect.require("height")?.to_string(),
        color: rect_color(rect)?,
        script: required_script(rect)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_svg_str;
    use std::path::PathBuf;

    fn decode(svg: &str) -> Result<Level> {
        let doc = parse_svg_str(svg).expect("Failed to parse SVG");
        Level::from_document(&doc)
    }

    #[test]
    fn test_decode_every_category() {
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg">
    <rect id="background" x="0" y="0" width="800" height="600" style="fill:#1d1d1d"/>
    <rect id="player" x="10" y="20" width="25" height="25" style="fill:#e40000">
        <title>spawn.scm</title>
    </rect>
    <rect id="rect1" x="0" y="500" width="800" height="100" style="fill:#fafafa"/>
    <rect id="goal3" x="700" y="450" width="20" height="20" style="fill:#ffd700"/>
    <rect id="lava1" x="100" y="580" width="50" height="20" style="fill:#ff2a2a"/>
    <rect id="backrect1" x="30" y="30" width="10" height="10" style="fill:#333333"/>
    <rect id="box2" x="200" y="480" width="20" height="20" style="fill:#a05a2c"/>
    <text id="label1" x="40" y="60" style="fill:#ffffff">
        <tspan>jump</tspan>
        <tspan>here</tspan>
    </text>
    <rect id="script1" x="300" y="300" width="90" height="90" style="fill:#2a7fff">
        <title>boom.scm big</title>
    </rect>
</svg>"##;

        let level = decode(svg).expect("Failed to decode level");

        assert_eq!(level.background.color, "1d1d1d");
        assert_eq!(level.player.x, "10");
        assert_eq!(level.player.color, "e40000");
        let player_script = level.player.script.as_ref().expect("player script");
        assert_eq!(player_script.path, PathBuf::from("spawn.scm"));

        assert_eq!(level.platforms.len(), 1);
        assert_eq!(level.platforms[0].width, "800");
        assert_eq!(level.goals[0].id, "goal3");
        assert_eq!(level.lavas[0].color, "ff2a2a");
        assert_eq!(level.back_platforms[0].x, "30");
        assert_eq!(level.boxes[0].id, "box2");
        assert_eq!(level.labels[0].text, "jump here");
        assert_eq!(level.script_regions[0].script.args, vec!["big"]);
    }

    #[test]
    fn test_decode_player_without_script() {
        let svg = r##"<svg>
    <rect id="background" style="fill:#000000"/>
    <rect id="player" x="0" y="0" style="fill:#111111"/>
</svg>"##;

        let level = decode(svg).expect("Failed to decode level");
        assert_eq!(level.player.script, None);
    }

    #[test]
    fn test_decode_missing_style_attribute() {
        let svg = r##"<svg>
    <rect id="background"/>
    <rect id="player" x="0" y="0" style="fill:#111111"/>
</svg>"##;

        let err = decode(svg).expect_err("should reject missing style");
        assert!(matches!(
            err,
            LevelError::MissingAttribute { attr: "style", .. }
        ));
    }

    #[test]
    fn test_decode_style_without_fill() {
        let svg = r##"<svg>
    <rect id="background" style="stroke:#000000"/>
    <rect id="player" x="0" y="0" style="fill:#111111"/>
</svg>"##;

        let err = decode(svg).expect_err("should reject fill-less style");
        match err {
            LevelError::MalformedStyle { shape } => assert_eq!(shape, "background"),
            other => panic!("Expected MalformedStyle, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_platform_missing_geometry() {
        let svg = r##"<svg>
    <rect id="background" style="fill:#000000"/>
    <rect id="player" x="0" y="0" style="fill:#111111"/>
    <rect id="rect1" x="0" y="0" height="1" style="fill:#222222"/>
</svg>"##;

        let err = decode(svg).expect_err("should reject missing width");
        assert!(matches!(
            err,
            LevelError::MissingAttribute { attr: "width", .. }
        ));
    }

    #[test]
    fn test_decode_script_region_without_child() {
        let svg = r##"<svg>
    <rect id="background" style="fill:#000000"/>
    <rect id="player" x="0" y="0" style="fill:#111111"/>
    <rect id="script1" x="0" y="0" width="1" height="1" style="fill:#222222"/>
</svg>"##;

        let err = decode(svg).expect_err("should require a command line child");
        assert!(matches!(err, LevelError::MissingScriptChild { .. }));
    }

    #[test]
    fn test_decode_script_region_with_blank_child() {
        let svg = r##"<svg>
    <rect id="background" style="fill:#000000"/>
    <rect id="player" x="0" y="0" style="fill:#111111"/>
    <rect id="script1" x="0" y="0" width="1" height="1" style="fill:#222222"><title/></rect>
</svg>"##;

        let err = decode(svg).expect_err("blank child holds no command line");
        assert!(matches!(err, LevelError::MissingScriptChild { .. }));
    }

    #[test]
    fn test_decode_script_region_with_two_children() {
        let svg = r##"<svg>
    <rect id="background" style="fill:#000000"/>
    <rect id="player" x="0" y="0" style="fill:#111111"/>
    <rect id="script1" x="0" y="0" width="1" height="1" style="fill:#222222">
        <title>a.scm</title>
        <desc>b.scm</desc>
    </rect>
</svg>"##;

        let err = decode(svg).expect_err("should reject two children");
        assert!(matches!(err, LevelError::MultipleScriptChildren { .. }));
    }

    #[test]
    fn test_decode_label_without_spans() {
        let svg = r##"<svg>
    <rect id="background" style="fill:#000000"/>
    <rect id="player" x="0" y="0" style="fill:#111111"/>
    <text id="label1" x="5" y="6" style="fill:#ffffff"></text>
</svg>"##;

        let level = decode(svg).expect("Failed to decode level");
        assert_eq!(level.labels[0].text, "");
    }
}
