//! Row, Column and their flexible children.
//!
//! Fixed children are measured first. Whatever main-axis space they leave is
//! divided among the flexible children (Expanded, Flexible, Spacer) in
//! proportion to their weights.

use serde::Deserialize;

use super::{BoxConstraints, RenderBox, wrap_children};
use crate::{
    core::LayoutCx,
    error::{Error, Result},
    geom::{Axis, Point, Size},
};

/// Placement of children along the main axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MainAxisAlignment {
    /// Pack at the start.
    #[default]
    Start,
    /// Pack in the middle.
    Center,
    /// Pack at the end.
    End,
    /// Free space between children only.
    SpaceBetween,
    /// Half a gap before the first and after the last child.
    SpaceAround,
    /// Equal gaps everywhere, including both ends.
    SpaceEvenly,
}

/// Placement of children along the cross axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CrossAxisAlignment {
    /// Align to the cross start.
    Start,
    /// Center on the cross axis.
    #[default]
    Center,
    /// Align to the cross end.
    End,
    /// Force children to the container's cross extent.
    Stretch,
}

/// How much main-axis space a flex container occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MainAxisSize {
    /// Shrink to the children.
    Min,
    /// Fill the finite maximum.
    #[default]
    Max,
}

/// How a flexible child uses its share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FlexFit {
    /// The child must fill its share.
    Tight,
    /// The child may be smaller than its share.
    #[default]
    Loose,
}

/// Flex metadata a Row or Column reads from a child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlexProperties {
    /// Share weight, always positive.
    pub weight: u32,
    /// Fit within the share.
    pub fit: FlexFit,
}

/// Configuration of a Row or Column.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Flex {
    /// Main axis. Fixed by the tag, never read from a record.
    #[serde(skip)]
    pub axis: Axis,
    /// Main-axis placement.
    pub main_axis_alignment: MainAxisAlignment,
    /// Cross-axis placement.
    pub cross_axis_alignment: CrossAxisAlignment,
    /// Main-axis size policy.
    pub main_axis_size: MainAxisSize,
    /// Gap between adjacent children.
    pub spacing: f32,
}

impl Flex {
    /// A flex container along `axis` with default settings.
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            ..Self::default()
        }
    }

    /// Tag name used in diagnostics.
    fn variant(&self) -> &'static str {
        match self.axis {
            Axis::Horizontal => "Row",
            Axis::Vertical => "Column",
        }
    }

    /// Total spacing between `n` children.
    fn gaps(&self, n: usize) -> f32 {
        self.spacing * n.saturating_sub(1) as f32
    }

    /// Sum of main extents plus spacing.
    fn used(&self, children: &[Size]) -> f32 {
        children.iter().map(|c| c.along(self.axis)).sum::<f32>() + self.gaps(children.len())
    }
}

impl RenderBox for Flex {
    fn layout_children(
        &self,
        cx: &mut LayoutCx<'_>,
        constraints: BoxConstraints,
    ) -> Result<Vec<Size>> {
        let axis = self.axis;
        let n = cx.child_count();
        let flexes: Vec<Option<FlexProperties>> = (0..n).map(|i| cx.flex_of(i)).collect();
        let total_weight: u32 = flexes.iter().flatten().map(|f| f.weight).sum();

        let main_max = constraints.max(axis);
        if total_weight > 0 && !main_max.is_finite() && self.main_axis_size == MainAxisSize::Max {
            return Err(Error::LayoutContradiction {
                axis,
                variant: self.variant(),
                hint: "give the container a bounded main axis (e.g. wrap it in a SizedBox) \
                       or set mainAxisSize to min",
            });
        }

        let cross_max = constraints.max(axis.cross());
        let cross = if self.cross_axis_alignment == CrossAxisAlignment::Stretch
            && cross_max.is_finite()
        {
            (cross_max, cross_max)
        } else {
            (0.0, cross_max)
        };

        let mut sizes = vec![Size::ZERO; n];
        let mut total_fixed = self.gaps(n);
        for (index, flex) in flexes.iter().enumerate() {
            if flex.is_none() {
                let c = BoxConstraints::from_axes(axis, (0.0, main_max), cross);
                sizes[index] = cx.layout_child(index, c)?;
                total_fixed += sizes[index].along(axis);
            }
        }

        let remaining = if main_max.is_finite() {
            (main_max - total_fixed).max(0.0)
        } else {
            0.0
        };
        for (index, flex) in flexes.iter().enumerate() {
            if let Some(flex) = flex {
                let share = remaining * flex.weight as f32 / total_weight as f32;
                let main = match flex.fit {
                    FlexFit::Tight => (share, share),
                    FlexFit::Loose => (0.0, share),
                };
                let c = BoxConstraints::from_axes(axis, main, cross);
                sizes[index] = cx.layout_child(index, c)?;
            }
        }
        tracing::trace!(
            variant = self.variant(),
            total_weight,
            remaining,
            "flex distribution"
        );
        Ok(sizes)
    }

    fn perform_layout(
        &self,
        _cx: &LayoutCx<'_>,
        constraints: BoxConstraints,
        children: &[Size],
    ) -> Result<Size> {
        let axis = self.axis;
        let mut main = self.used(children);
        if self.main_axis_size == MainAxisSize::Max && constraints.is_bounded(axis) {
            main = main.max(constraints.max(axis));
        }
        let cross = children
            .iter()
            .map(|c| c.along(axis.cross()))
            .fold(0.0f32, f32::max);
        Ok(constraints.constrain(Size::from_axes(axis, main, cross)))
    }

    fn position_children(&self, _cx: &LayoutCx<'_>, size: Size, children: &[Size]) -> Vec<Point> {
        let axis = self.axis;
        let free = (size.along(axis) - self.used(children)).max(0.0);
        let (lead, between) = distribute(self.main_axis_alignment, free, children.len());
        let cross_extent = size.along(axis.cross());

        let mut cursor = lead;
        children
            .iter()
            .map(|child| {
                let slack = cross_extent - child.along(axis.cross());
                let cross = match self.cross_axis_alignment {
                    CrossAxisAlignment::Start | CrossAxisAlignment::Stretch => 0.0,
                    CrossAxisAlignment::Center => slack / 2.0,
                    CrossAxisAlignment::End => slack,
                };
                let at = Point::from_axes(axis, cursor, cross);
                cursor += child.along(axis) + self.spacing + between;
                at
            })
            .collect()
    }
}

/// Leading offset and extra inter-child gap for `free` main-axis space
/// distributed over `n` children.
pub(super) fn distribute(alignment: MainAxisAlignment, free: f32, n: usize) -> (f32, f32) {
    if n == 0 {
        return (0.0, 0.0);
    }
    let count = n as f32;
    match alignment {
        MainAxisAlignment::Start => (0.0, 0.0),
        MainAxisAlignment::Center => (free / 2.0, 0.0),
        MainAxisAlignment::End => (free, 0.0),
        MainAxisAlignment::SpaceBetween if n > 1 => (0.0, free / (count - 1.0)),
        MainAxisAlignment::SpaceBetween => (0.0, 0.0),
        MainAxisAlignment::SpaceAround => (free / count / 2.0, free / count),
        MainAxisAlignment::SpaceEvenly => (free / (count + 1.0), free / (count + 1.0)),
    }
}

// ---------------------------------------------------------------------------
// Flexible children

/// Configuration of an Expanded, Flexible or Spacer node.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Flexible {
    /// Share weight. Zero makes the child fixed.
    pub flex: u32,
    /// Fit within the share. Expanded and Spacer always fit tight.
    pub fit: FlexFit,
}

impl Default for Flexible {
    fn default() -> Self {
        Self {
            flex: 1,
            fit: FlexFit::Loose,
        }
    }
}

impl Flexible {
    /// An Expanded configuration with the given weight.
    pub fn expanded(flex: u32) -> Self {
        Self {
            flex,
            fit: FlexFit::Tight,
        }
    }

    /// The flex metadata a parent reads, if this child is flexible at all.
    pub fn properties(&self) -> Option<FlexProperties> {
        (self.flex > 0).then_some(FlexProperties {
            weight: self.flex,
            fit: self.fit,
        })
    }
}

impl RenderBox for Flexible {
    fn perform_layout(
        &self,
        _cx: &LayoutCx<'_>,
        constraints: BoxConstraints,
        children: &[Size],
    ) -> Result<Size> {
        Ok(wrap_children(constraints, children))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn distribution_modes() {
        assert_eq!(distribute(MainAxisAlignment::Start, 90.0, 3), (0.0, 0.0));
        assert_eq!(distribute(MainAxisAlignment::Center, 90.0, 3), (45.0, 0.0));
        assert_eq!(distribute(MainAxisAlignment::End, 90.0, 3), (90.0, 0.0));
        assert_eq!(
            distribute(MainAxisAlignment::SpaceBetween, 90.0, 3),
            (0.0, 45.0)
        );
        assert_eq!(
            distribute(MainAxisAlignment::SpaceAround, 90.0, 3),
            (15.0, 30.0)
        );
        assert_eq!(
            distribute(MainAxisAlignment::SpaceEvenly, 80.0, 3),
            (20.0, 20.0)
        );
        assert_eq!(
            distribute(MainAxisAlignment::SpaceBetween, 90.0, 1),
            (0.0, 0.0)
        );
        assert_eq!(distribute(MainAxisAlignment::SpaceAround, 90.0, 0), (0.0, 0.0));
    }

    #[test]
    fn zero_weight_is_fixed() {
        assert_eq!(Flexible { flex: 0, ..Flexible::default() }.properties(), None);
        assert_eq!(
            Flexible::expanded(2).properties(),
            Some(FlexProperties {
                weight: 2,
                fit: FlexFit::Tight
            })
        );
    }

    #[test]
    fn decode_flex_fields() -> Result<()> {
        let f: Flex = serde_json::from_value(json!({
            "mainAxisAlignment": "spaceBetween",
            "crossAxisAlignment": "stretch",
            "mainAxisSize": "min",
            "spacing": 4,
        }))?;
        assert_eq!(f.main_axis_alignment, MainAxisAlignment::SpaceBetween);
        assert_eq!(f.cross_axis_alignment, CrossAxisAlignment::Stretch);
        assert_eq!(f.main_axis_size, MainAxisSize::Min);
        assert_eq!(f.spacing, 4.0);
        assert!(serde_json::from_value::<Flex>(json!({"mainAxisAlignment": "around"})).is_err());
        Ok(())
    }
}
