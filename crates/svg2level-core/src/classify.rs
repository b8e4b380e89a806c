//! Shape classification by identifier convention
//!
//! Level editors tag shapes through their `id` attribute: exact names for
//! the two required singletons, prefixes for everything else. Shapes whose
//! id matches no rule are not part of the level and are skipped.

use crate::element::{RectElement, TextElement};
use crate::error::{LevelError, Result};
use crate::parser::SvgDocument;

/// Semantic groups shapes are partitioned into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Level background color source (exactly one, id `background`)
    Background,
    /// Player spawn rectangle (exactly one, id `player`)
    Player,
    /// Solid platform (id prefix `rect`)
    Platform,
    /// Decorative platform behind the play field (id prefix `backrect`)
    BackPlatform,
    /// Goal marker (id prefix `goal`)
    Goal,
    /// Lava region (id prefix `lava`)
    Lava,
    /// Pushable box (id prefix `box`)
    Box,
    /// On-screen label (text element, id prefix `label`)
    Label,
    /// Scripted trigger region (id prefix `script`)
    ScriptRegion,
}

/// How a classification rule matches a shape id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Matcher {
    Exact(&'static str),
    Prefix(&'static str),
}

impl Matcher {
    #[inline]
    fn matches(self, id: &str) -> bool {
        match self {
            Self::Exact(name) => id == name,
            Self::Prefix(prefix) => id.starts_with(prefix),
        }
    }
}

/// Rectangle rules, checked top to bottom, first match wins.
///
/// `backrect` stays above `rect` so its ids never fall through to the
/// shorter prefix.
const RECT_RULES: [(Matcher, Category); 8] = [
    (Matcher::Exact("background"), Category::Background),
    (Matcher::Exact("player"), Category::Player),
    (Matcher::Prefix("backrect"), Category::BackPlatform),
    (Matcher::Prefix("rect"), Category::Platform),
    (Matcher::Prefix("goal"), Category::Goal),
    (Matcher::Prefix("lava"), Category::Lava),
    (Matcher::Prefix("box"), Category::Box),
    (Matcher::Prefix("script"), Category::ScriptRegion),
];

/// Text element rules
const TEXT_RULES: [(Matcher, Category); 1] = [(Matcher::Prefix("label"), Category::Label)];

/// Category of a rectangle id, if any rule matches
#[must_use]
pub fn rect_category(id: &str) -> Option<Category> {
    RECT_RULES
        .iter()
        .find(|(matcher, _)| matcher.matches(id))
        .map(|(_, category)| *category)
}

/// Category of a text element id, if any rule matches
#[must_use]
pub fn text_category(id: &str) -> Option<Category> {
    TEXT_RULES
        .iter()
        .find(|(matcher, _)| matcher.matches(id))
        .map(|(_, category)| *category)
}

/// Document shapes partitioned by category
///
/// Each list keeps the document's original element order.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorizedShapes<'a> {
    /// The single `background` rectangle
    pub background: &'a RectElement,

    /// The single `player` rectangle
    pub player: &'a RectElement,

    /// Solid platforms
    pub platforms: Vec<&'a RectElement>,

    /// Goal markers
    pub goals: Vec<&'a RectElement>,

    /// Lava regions
    pub lavas: Vec<&'a RectElement>,

    /// Decorative back platforms
    pub back_platforms: Vec<&'a RectElement>,

    /// Pushable boxes
    pub boxes: Vec<&'a RectElement>,

    /// On-screen labels
    pub labels: Vec<&'a TextElement>,

    /// Scripted trigger regions
    pub script_regions: Vec<&'a RectElement>,
}

/// Exactly-one check for the required singleton shapes
fn require_single<'a>(id: &'static str, found: &[&'a RectElement]) -> Result<&'a RectElement> {
    match found {
        [single] => Ok(single),
        _ => Err(LevelError::MissingRequiredShape {
            id,
            found: found.len(),
        }),
    }
}

/// Partition a parsed document's shapes into categories
///
/// # Errors
///
/// Returns `LevelError::MissingRequiredShape` unless the document carries
/// exactly one `background` and exactly one `player` rectangle.
pub fn classify(doc: &SvgDocument) -> Result<CategorizedShapes<'_>> {
    let mut backgrounds = Vec::new();
    let mut players = Vec::new();
    let mut platforms = Vec::new();
    let mut goals = Vec::new();
    let mut lavas = Vec::new();
    let mut back_platforms = Vec::new();
    let mut boxes = Vec::new();
    let mut labels = Vec::new();
    let mut script_regions = Vec::new();

    for rect in &doc.rects {
        let Some(id) = rect.id.as_deref() else {
            log::debug!("Ignoring rect without id at document position {}", rect.doc_index);
            continue;
        };
        let Some(category) = rect_category(id) else {
            log::debug!("Ignoring rect `{id}`: no category rule matches");
            continue;
        };
        match category {
            Category::Background => backgrounds.push(rect),
            Category::Player => players.push(rect),
            Category::Platform => platforms.push(rect),
            Category::BackPlatform => back_platforms.push(rect),
            Category::Goal => goals.push(rect),
            Category::Lava => lavas.push(rect),
            Category::Box => boxes.push(rect),
            Category::ScriptRegion => script_regions.push(rect),
            // Labels never come out of the rect rules
            Category::Label => {}
        }
    }

    for elem in &doc.texts {
        let Some(id) = elem.id.as_deref() else {
            log::debug!("Ignoring text without id at document position {}", elem.doc_index);
            continue;
        };
        if text_category(id) == Some(Category::Label) {
            labels.push(elem);
        } else {
            log::debug!("Ignoring text `{id}`: no category rule matches");
        }
    }

    Ok(CategorizedShapes {
        background: require_single("background", &backgrounds)?,
        player: require_single("player", &players)?,
        platforms,
        goals,
        lavas,
        back_platforms,
        boxes,
        labels,
        script_regions,
    })
}
