//! Property records and the variant registry.
//!
//! A [`Record`] describes one node: its variant-specific [`Props`], identity
//! (`key`), stacking (`z_index`), layer caching (`repaint_boundary`) and
//! ordered child records. Records are decoded from JSON-shaped values by
//! looking the `type` field up in the closed [`Tag`] table.

use std::{fmt, rc::Rc, str::FromStr};

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::{
    error::{Error, Result},
    layout::{
        RenderBox,
        box_model::{Align, Center, ClipRect, Container, Padding, SizedBox},
        flex::{Flex, FlexFit, FlexProperties, Flexible},
        leaf::{CustomPaint, Image, Text},
        proxy::RepaintBoundary,
        stack::{Positioned, Stack},
        wrap::Wrap,
    },
    geom::Axis,
};

/// How much work a record change requires. Ordered from cheapest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Change {
    /// Nothing observable changed.
    None,
    /// Only painted output changed.
    Paint,
    /// The node's offset within its parent changed, not its size.
    Position,
    /// Size or child layout may have changed.
    Layout,
}

/// Variant names accepted in the `type` field of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// General-purpose decorated box.
    Container,
    /// Insets a child.
    Padding,
    /// Explicit size.
    SizedBox,
    /// Centers a child.
    Center,
    /// Aligns a child.
    Align,
    /// Clips children.
    ClipRect,
    /// Horizontal flex.
    Row,
    /// Vertical flex.
    Column,
    /// Tight flexible child.
    Expanded,
    /// Loose flexible child.
    Flexible,
    /// Empty tight flexible child.
    Spacer,
    /// Overlapping children.
    Stack,
    /// Edge-placed Stack child.
    Positioned,
    /// Run-based flow.
    Wrap,
    /// Text leaf.
    Text,
    /// Image leaf.
    Image,
    /// Named-painter leaf.
    CustomPaint,
    /// Layer-caching wrapper.
    RepaintBoundary,
}

impl Tag {
    /// Every tag, in registry order.
    pub const ALL: [Self; 18] = [
        Self::Container,
        Self::Padding,
        Self::SizedBox,
        Self::Center,
        Self::Align,
        Self::ClipRect,
        Self::Row,
        Self::Column,
        Self::Expanded,
        Self::Flexible,
        Self::Spacer,
        Self::Stack,
        Self::Positioned,
        Self::Wrap,
        Self::Text,
        Self::Image,
        Self::CustomPaint,
        Self::RepaintBoundary,
    ];

    /// The name used in records.
    pub fn name(self) -> &'static str {
        match self {
            Self::Container => "Container",
            Self::Padding => "Padding",
            Self::SizedBox => "SizedBox",
            Self::Center => "Center",
            Self::Align => "Align",
            Self::ClipRect => "ClipRect",
            Self::Row => "Row",
            Self::Column => "Column",
            Self::Expanded => "Expanded",
            Self::Flexible => "Flexible",
            Self::Spacer => "Spacer",
            Self::Stack => "Stack",
            Self::Positioned => "Positioned",
            Self::Wrap => "Wrap",
            Self::Text => "Text",
            Self::Image => "Image",
            Self::CustomPaint => "CustomPaint",
            Self::RepaintBoundary => "RepaintBoundary",
        }
    }

    /// Decode the typed configuration for this tag from a record.
    pub fn decode(self, value: &Value) -> Result<Props> {
        Ok(match self {
            Self::Container => Props::Container(decode(value)?),
            Self::Padding => Props::Padding(decode(value)?),
            Self::SizedBox => Props::SizedBox(decode(value)?),
            Self::Center => Props::Center(decode(value)?),
            Self::Align => Props::Align(decode(value)?),
            Self::ClipRect => Props::ClipRect(decode(value)?),
            Self::Row => Props::Row(Flex {
                axis: Axis::Horizontal,
                ..decode::<Flex>(value)?
            }),
            Self::Column => Props::Column(Flex {
                axis: Axis::Vertical,
                ..decode::<Flex>(value)?
            }),
            Self::Expanded => Props::Expanded(Flexible {
                fit: FlexFit::Tight,
                ..decode::<Flexible>(value)?
            }),
            Self::Flexible => Props::Flexible(decode(value)?),
            Self::Spacer => Props::Spacer(Flexible {
                fit: FlexFit::Tight,
                ..decode::<Flexible>(value)?
            }),
            Self::Stack => Props::Stack(decode(value)?),
            Self::Positioned => Props::Positioned(decode(value)?),
            Self::Wrap => Props::Wrap(decode(value)?),
            Self::Text => Props::Text(decode(value)?),
            Self::Image => Props::Image(decode(value)?),
            Self::CustomPaint => Props::CustomPaint(decode(value)?),
            Self::RepaintBoundary => Props::RepaintBoundary(decode(value)?),
        })
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| Error::Config(format!("unknown node type: {s}")))
    }
}

/// Deserialize a typed configuration from a record value.
fn decode<T: DeserializeOwned>(value: &Value) -> Result<T> {
    Ok(T::deserialize(value)?)
}

/// Typed configuration of one node.
#[derive(Debug, Clone, PartialEq)]
pub enum Props {
    /// See [`Container`].
    Container(Container),
    /// See [`Padding`].
    Padding(Padding),
    /// See [`SizedBox`].
    SizedBox(SizedBox),
    /// See [`Center`].
    Center(Center),
    /// See [`Align`].
    Align(Align),
    /// See [`ClipRect`].
    ClipRect(ClipRect),
    /// Horizontal [`Flex`].
    Row(Flex),
    /// Vertical [`Flex`].
    Column(Flex),
    /// [`Flexible`] with a tight fit.
    Expanded(Flexible),
    /// See [`Flexible`].
    Flexible(Flexible),
    /// Childless [`Flexible`] with a tight fit.
    Spacer(Flexible),
    /// See [`Stack`].
    Stack(Stack),
    /// See [`Positioned`].
    Positioned(Positioned),
    /// See [`Wrap`].
    Wrap(Wrap),
    /// See [`Text`].
    Text(Text),
    /// See [`Image`].
    Image(Image),
    /// See [`CustomPaint`].
    CustomPaint(CustomPaint),
    /// See [`RepaintBoundary`].
    RepaintBoundary(RepaintBoundary),
}

impl Props {
    /// The registry tag for these props.
    pub fn tag(&self) -> Tag {
        match self {
            Self::Container(_) => Tag::Container,
            Self::Padding(_) => Tag::Padding,
            Self::SizedBox(_) => Tag::SizedBox,
            Self::Center(_) => Tag::Center,
            Self::Align(_) => Tag::Align,
            Self::ClipRect(_) => Tag::ClipRect,
            Self::Row(_) => Tag::Row,
            Self::Column(_) => Tag::Column,
            Self::Expanded(_) => Tag::Expanded,
            Self::Flexible(_) => Tag::Flexible,
            Self::Spacer(_) => Tag::Spacer,
            Self::Stack(_) => Tag::Stack,
            Self::Positioned(_) => Tag::Positioned,
            Self::Wrap(_) => Tag::Wrap,
            Self::Text(_) => Tag::Text,
            Self::Image(_) => Tag::Image,
            Self::CustomPaint(_) => Tag::CustomPaint,
            Self::RepaintBoundary(_) => Tag::RepaintBoundary,
        }
    }

    /// The layout and paint policy for these props.
    pub fn render_box(&self) -> &dyn RenderBox {
        match self {
            Self::Container(p) => p,
            Self::Padding(p) => p,
            Self::SizedBox(p) => p,
            Self::Center(p) => p,
            Self::Align(p) => p,
            Self::ClipRect(p) => p,
            Self::Row(p) | Self::Column(p) => p,
            Self::Expanded(p) | Self::Flexible(p) | Self::Spacer(p) => p,
            Self::Stack(p) => p,
            Self::Positioned(p) => p,
            Self::Wrap(p) => p,
            Self::Text(p) => p,
            Self::Image(p) => p,
            Self::CustomPaint(p) => p,
            Self::RepaintBoundary(p) => p,
        }
    }

    /// Flex metadata, for weighted Expanded, Flexible and Spacer nodes.
    pub fn flex(&self) -> Option<FlexProperties> {
        match self {
            Self::Expanded(f) | Self::Flexible(f) | Self::Spacer(f) => f.properties(),
            _ => None,
        }
    }

    /// Positioning metadata, for Positioned nodes.
    pub fn positioned(&self) -> Option<&Positioned> {
        match self {
            Self::Positioned(p) => Some(p),
            _ => None,
        }
    }

    /// True for wrappers a Stack looks through when reading parent data.
    pub fn is_transparent(&self) -> bool {
        matches!(self, Self::RepaintBoundary(_))
    }

    /// True if these props are read by the parent's layout.
    pub fn is_parent_data(&self) -> bool {
        matches!(
            self,
            Self::Expanded(_) | Self::Flexible(_) | Self::Spacer(_) | Self::Positioned(_)
        )
    }

    /// Classify the change from `self` to `new`. Props of different variants
    /// always require layout.
    pub fn classify(&self, new: &Self) -> Change {
        if self == new {
            return Change::None;
        }
        match (self, new) {
            (Self::Container(a), Self::Container(b)) => {
                if a.layout != b.layout {
                    Change::Layout
                } else {
                    Change::Paint
                }
            }
            (Self::Positioned(a), Self::Positioned(b)) => {
                if a.width != b.width || a.height != b.height {
                    Change::Layout
                } else {
                    Change::Position
                }
            }
            (Self::Text(a), Self::Text(b)) => {
                if a.text != b.text || a.max_lines != b.max_lines || !a.style.same_metrics(&b.style)
                {
                    Change::Layout
                } else {
                    Change::Paint
                }
            }
            (Self::Image(a), Self::Image(b)) => {
                if a.src != b.src || a.width != b.width || a.height != b.height {
                    Change::Layout
                } else {
                    Change::Paint
                }
            }
            (Self::CustomPaint(a), Self::CustomPaint(b)) => {
                if a.width != b.width || a.height != b.height {
                    Change::Layout
                } else {
                    Change::Paint
                }
            }
            _ => Change::Layout,
        }
    }
}

/// One node's property record.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Stable identity across rebuilds.
    pub key: Option<String>,
    /// Stacking order among siblings. Higher paints later and is hit first.
    pub z_index: i32,
    /// Cache this subtree's painted output in a layer.
    pub repaint_boundary: bool,
    /// Variant configuration.
    pub props: Props,
    /// Ordered child records.
    pub children: Vec<Rc<Record>>,
}

impl Record {
    /// A record with no key, children or stacking.
    pub fn new(props: Props) -> Self {
        Self {
            key: None,
            z_index: 0,
            repaint_boundary: false,
            props,
            children: Vec::new(),
        }
    }

    /// Set the key.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set the z-index.
    pub fn z_index(mut self, z: i32) -> Self {
        self.z_index = z;
        self
    }

    /// Mark as a repaint boundary.
    pub fn repaint_boundary(mut self, on: bool) -> Self {
        self.repaint_boundary = on;
        self
    }

    /// Append a child.
    pub fn child(mut self, child: impl Into<Rc<Self>>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append several children.
    pub fn children<I, R>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Rc<Self>>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// The record's tag.
    pub fn tag(&self) -> Tag {
        self.props.tag()
    }

    /// Parse a record tree from JSON text.
    pub fn from_json(s: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(s)?;
        Self::from_value(&value)
    }

    /// Decode a record tree from a JSON-shaped value.
    pub fn from_value(value: &Value) -> Result<Self> {
        let map = value
            .as_object()
            .ok_or_else(|| Error::Config(format!("record must be an object, got {value}")))?;
        let tag: Tag = map
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::Config("record is missing a string type".into()))?
            .parse()?;
        let props = tag.decode(value)?;
        Ok(Self {
            key: record_key(map)?,
            z_index: record_z_index(map)?,
            repaint_boundary: match map.get("repaintBoundary") {
                None | Some(Value::Null) => false,
                Some(v) => v
                    .as_bool()
                    .ok_or_else(|| Error::Config(format!("repaintBoundary must be a bool: {v}")))?,
            },
            props,
            children: record_children(map)?,
        })
    }

    /// Classify the change from `self` to `new`, ignoring children.
    pub fn classify(&self, new: &Self) -> Change {
        let own = self.props.classify(&new.props);
        if self.z_index != new.z_index || self.repaint_boundary != new.repaint_boundary {
            own.max(Change::Paint)
        } else {
            own
        }
    }
}

/// Read the optional `key`, accepting strings and numbers.
fn record_key(map: &Map<String, Value>) -> Result<Option<String>> {
    match map.get("key") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(Error::Config(format!(
            "key must be a string or number: {other}"
        ))),
    }
}

/// Read the optional `zIndex`.
fn record_z_index(map: &Map<String, Value>) -> Result<i32> {
    match map.get("zIndex") {
        None | Some(Value::Null) => Ok(0),
        Some(v) => v
            .as_i64()
            .and_then(|z| i32::try_from(z).ok())
            .ok_or_else(|| Error::Config(format!("zIndex must be an integer: {v}"))),
    }
}

/// Read `children`, or a single `child`.
fn record_children(map: &Map<String, Value>) -> Result<Vec<Rc<Record>>> {
    match (map.get("children"), map.get("child")) {
        (Some(Value::Array(items)), _) => items
            .iter()
            .map(|v| Record::from_value(v).map(Rc::new))
            .collect(),
        (Some(other), _) if !other.is_null() => Err(Error::Config(format!(
            "children must be a list: {other}"
        ))),
        (_, Some(child)) if !child.is_null() => Ok(vec![Rc::new(Record::from_value(child)?)]),
        _ => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::geom::EdgeInsets;

    #[test]
    fn tag_registry_round_trips_names() -> Result<()> {
        for tag in Tag::ALL {
            assert_eq!(tag.name().parse::<Tag>()?, tag);
        }
        assert!(matches!("Blink".parse::<Tag>(), Err(Error::Config(_))));
        Ok(())
    }

    #[test]
    fn decode_nested_record() -> Result<()> {
        let r = Record::from_value(&json!({
            "type": "Row",
            "key": 7,
            "children": [
                {"type": "SizedBox", "width": 100},
                {"type": "Expanded", "child": {"type": "Container", "padding": 4}},
            ],
        }))?;
        assert_eq!(r.tag(), Tag::Row);
        assert_eq!(r.key.as_deref(), Some("7"));
        assert_eq!(r.children.len(), 2);
        assert_eq!(
            r.children[1].props.flex(),
            Some(FlexProperties {
                weight: 1,
                fit: FlexFit::Tight
            })
        );
        match &r.children[1].children[0].props {
            Props::Container(c) => assert_eq!(c.layout.padding, EdgeInsets::all(4.0)),
            other => panic!("unexpected props {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn row_and_column_set_their_axis() -> Result<()> {
        match Record::from_value(&json!({"type": "Column"}))?.props {
            Props::Column(f) => assert_eq!(f.axis, Axis::Vertical),
            other => panic!("unexpected props {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn structural_errors_are_config_errors() {
        for bad in [
            json!([]),
            json!({"key": "a"}),
            json!({"type": "Nope"}),
            json!({"type": "Row", "children": {"type": "Text"}}),
            json!({"type": "Row", "zIndex": "top"}),
            json!({"type": "Flex", "mainAxisSize": "huge"}),
            json!({"type": "Row", "mainAxisSize": "huge"}),
        ] {
            assert!(
                matches!(Record::from_value(&bad), Err(Error::Config(_))),
                "{bad}"
            );
        }
    }

    #[test]
    fn classification() -> Result<()> {
        let base = Record::from_value(&json!({"type": "Container", "width": 10, "color": "red"}))?;
        let recolor = Record::from_value(&json!({"type": "Container", "width": 10, "color": "blue"}))?;
        let resize = Record::from_value(&json!({"type": "Container", "width": 20, "color": "red"}))?;
        assert_eq!(base.classify(&base.clone()), Change::None);
        assert_eq!(base.classify(&recolor), Change::Paint);
        assert_eq!(base.classify(&resize), Change::Layout);
        assert_eq!(base.classify(&base.clone().z_index(3)), Change::Paint);

        let p = Record::from_value(&json!({"type": "Positioned", "left": 1, "width": 5}))?;
        let moved = Record::from_value(&json!({"type": "Positioned", "left": 9, "width": 5}))?;
        assert_eq!(p.classify(&moved), Change::Position);

        let t = Record::from_value(&json!({"type": "Text", "text": "a", "style": {"color": "red"}}))?;
        let t2 = Record::from_value(&json!({"type": "Text", "text": "a", "style": {"color": "blue"}}))?;
        let t3 = Record::from_value(&json!({"type": "Text", "text": "a", "style": {"fontSize": 20}}))?;
        assert_eq!(t.classify(&t2), Change::Paint);
        assert_eq!(t.classify(&t3), Change::Layout);
        Ok(())
    }
}
