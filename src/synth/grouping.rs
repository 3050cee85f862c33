//! Spatial grouping: row clustering and label/input pairing.

use crate::config::GroupingConfig;
use crate::model::FormElement;

/// Strategy for clustering a page's elements into visual rows.
///
/// The greedy streaming clusterer is the default for fidelity with the
/// upstream pipeline; a centroid-based or globally optimal strategy can
/// be substituted without touching callers.
pub trait RowClustering {
    /// Cluster elements (in normalizer emission order) into row groups.
    /// Each group's members come back sorted by ascending `left`.
    fn cluster<'a>(
        &self,
        elements: &'a [FormElement],
        config: &GroupingConfig,
    ) -> Vec<Vec<&'a FormElement>>;
}

/// Greedy, single-pass, first-match row clustering.
///
/// Maintains an ordered list of open groups; each element joins the
/// first group whose running mean `top` is within the row tolerance,
/// else starts a new group. Deliberately first-match rather than
/// best-match, and groups are never rebalanced once formed.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyRowClusterer;

impl RowClustering for GreedyRowClusterer {
    fn cluster<'a>(
        &self,
        elements: &'a [FormElement],
        config: &GroupingConfig,
    ) -> Vec<Vec<&'a FormElement>> {
        let (_, scale_y) = config.working_scale();

        struct OpenGroup<'a> {
            members: Vec<&'a FormElement>,
            top_sum: f32,
        }

        impl OpenGroup<'_> {
            fn mean_top(&self) -> f32 {
                self.top_sum / self.members.len() as f32
            }
        }

        let mut groups: Vec<OpenGroup<'a>> = Vec::new();

        for element in elements {
            let top = element.bounding_box.top * scale_y;
            match groups
                .iter_mut()
                .find(|g| (g.mean_top() - top).abs() <= config.row_tolerance)
            {
                Some(group) => {
                    group.members.push(element);
                    group.top_sum += top;
                }
                None => {
                    log::debug!(
                        "Element {} opens row group {} (top {:.3})",
                        element.id,
                        groups.len(),
                        top
                    );
                    groups.push(OpenGroup {
                        members: vec![element],
                        top_sum: top,
                    });
                }
            }
        }

        groups
            .into_iter()
            .map(|mut g| {
                g.members.sort_by(|a, b| {
                    a.bounding_box
                        .left
                        .partial_cmp(&b.bounding_box.left)
                        .unwrap_or(std::cmp::Ordering::Equal)
                });
                g.members
            })
            .collect()
    }
}

/// A pairing produced by spatial analysis of one page.
#[derive(Debug, Clone)]
pub enum Pairing<'a> {
    /// A label matched with its nearest input within the pairing threshold
    LabeledInput {
        /// The label element
        label: &'a FormElement,
        /// The paired non-label element
        input: &'a FormElement,
    },
    /// An element that stands alone
    Standalone(&'a FormElement),
}

impl<'a> Pairing<'a> {
    /// The element whose identity anchors the pairing (label for pairs).
    pub fn anchor(&self) -> &'a FormElement {
        match self {
            Pairing::LabeledInput { label, .. } => label,
            Pairing::Standalone(element) => element,
        }
    }

    /// Minimum confidence across the pairing's elements.
    pub fn min_confidence(&self) -> f32 {
        match self {
            Pairing::LabeledInput { label, input } => label.confidence.min(input.confidence),
            Pairing::Standalone(element) => element.confidence,
        }
    }
}

/// Pair labels with inputs inside row groups.
///
/// Groups with more than one member are processed first, in group
/// creation order: each label pairs with the nearest non-label by
/// top-left corner distance when that distance is below the pairing
/// threshold; unpaired labels stand alone, and non-labels left over
/// after all labels are processed become standalone in emission order.
/// Singleton groups are appended after all multi-member groups.
pub fn pair_rows<'a>(
    groups: &[Vec<&'a FormElement>],
    config: &GroupingConfig,
) -> Vec<Pairing<'a>> {
    let (scale_x, scale_y) = config.working_scale();
    let mut pairings: Vec<Pairing<'a>> = Vec::new();

    for group in groups.iter().filter(|g| g.len() > 1) {
        let labels: Vec<&FormElement> = group.iter().copied().filter(|e| e.is_label()).collect();
        let others: Vec<&FormElement> = group.iter().copied().filter(|e| !e.is_label()).collect();
        let mut used = vec![false; others.len()];

        for label in labels {
            let nearest = others
                .iter()
                .enumerate()
                .filter(|(i, _)| !used[*i])
                .map(|(i, other)| {
                    let d = label
                        .bounding_box
                        .top_left_distance(&other.bounding_box, scale_x, scale_y);
                    (i, d)
                })
                .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

            match nearest {
                Some((i, distance)) if distance <= config.pairing_distance => {
                    used[i] = true;
                    pairings.push(Pairing::LabeledInput {
                        label,
                        input: others[i],
                    });
                }
                _ => pairings.push(Pairing::Standalone(label)),
            }
        }

        for (i, other) in others.iter().enumerate() {
            if !used[i] {
                pairings.push(Pairing::Standalone(other));
            }
        }
    }

    for group in groups.iter().filter(|g| g.len() == 1) {
        pairings.push(Pairing::Standalone(group[0]));
    }

    pairings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoundingBox, ElementType};

    fn element(id: &str, element_type: ElementType, left: f32, top: f32) -> FormElement {
        FormElement::new(
            id,
            element_type,
            format!("{} text", id),
            95.0,
            BoundingBox::new(left, top, 0.1, 0.02),
            1,
        )
    }

    fn pixel_config() -> GroupingConfig {
        // 1000x1000 reference page makes the legacy constants meaningful
        GroupingConfig::default().with_reference_page(1000.0, 1000.0)
    }

    #[test]
    fn test_near_tops_join_one_group() {
        let elements = vec![
            element("a", ElementType::Label, 0.1, 0.100),
            element("b", ElementType::Input, 0.4, 0.105),
        ];
        let groups = GreedyRowClusterer.cluster(&elements, &pixel_config());
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 2);
    }

    #[test]
    fn test_distant_top_starts_new_group() {
        let elements = vec![
            element("a", ElementType::Label, 0.1, 0.10),
            element("b", ElementType::Label, 0.1, 0.30),
        ];
        let groups = GreedyRowClusterer.cluster(&elements, &pixel_config());
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_first_match_not_best_match() {
        // Open groups at tops 100px and 112px; an element at 108px is
        // closer to the second but still within tolerance of the first
        // (|108 - 100| = 8 <= 10), so the first match wins.
        let elements = vec![
            element("a", ElementType::Text, 0.1, 0.100),
            element("b", ElementType::Text, 0.1, 0.112),
            element("c", ElementType::Text, 0.1, 0.108),
        ];
        let groups = GreedyRowClusterer.cluster(&elements, &pixel_config());
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].len(), 2);
        assert!(groups[0].iter().any(|e| e.id == "c"));
    }

    #[test]
    fn test_members_sorted_by_left() {
        let elements = vec![
            element("right", ElementType::Input, 0.6, 0.1),
            element("left", ElementType::Label, 0.1, 0.1),
        ];
        let groups = GreedyRowClusterer.cluster(&elements, &pixel_config());
        assert_eq!(groups[0][0].id, "left");
        assert_eq!(groups[0][1].id, "right");
    }

    #[test]
    fn test_legacy_normalized_units_collapse_rows() {
        // With no reference page the legacy pixel-flavored tolerance (10)
        // is compared against normalized tops in [0, 1], so every element
        // on the page lands in one group. Documented upstream behavior.
        let elements = vec![
            element("a", ElementType::Label, 0.1, 0.05),
            element("b", ElementType::Text, 0.1, 0.95),
        ];
        let groups = GreedyRowClusterer.cluster(&elements, &GroupingConfig::default());
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 2);
    }

    #[test]
    fn test_label_pairs_with_nearest_input() {
        let elements = vec![
            element("label", ElementType::Label, 0.10, 0.10),
            element("near", ElementType::Input, 0.13, 0.10),
            element("far", ElementType::Input, 0.40, 0.10),
        ];
        let config = pixel_config();
        let groups = GreedyRowClusterer.cluster(&elements, &config);
        let pairings = pair_rows(&groups, &config);

        // label+near pair first, then far standalone
        assert_eq!(pairings.len(), 2);
        match &pairings[0] {
            Pairing::LabeledInput { label, input } => {
                assert_eq!(label.id, "label");
                assert_eq!(input.id, "near");
            }
            other => panic!("expected pair, got {:?}", other),
        }
        match &pairings[1] {
            Pairing::Standalone(e) => assert_eq!(e.id, "far"),
            other => panic!("expected standalone, got {:?}", other),
        }
    }

    #[test]
    fn test_label_beyond_threshold_stands_alone() {
        // 300px horizontal distance > 50px pairing threshold
        let elements = vec![
            element("label", ElementType::Label, 0.10, 0.10),
            element("input", ElementType::Input, 0.40, 0.10),
        ];
        let config = pixel_config();
        let groups = GreedyRowClusterer.cluster(&elements, &config);
        let pairings = pair_rows(&groups, &config);

        assert_eq!(pairings.len(), 2);
        assert!(matches!(pairings[0], Pairing::Standalone(e) if e.id == "label"));
        assert!(matches!(pairings[1], Pairing::Standalone(e) if e.id == "input"));
    }

    #[test]
    fn test_singleton_groups_appended_last() {
        let elements = vec![
            element("solo", ElementType::Text, 0.1, 0.50),
            element("label", ElementType::Label, 0.10, 0.10),
            element("input", ElementType::Input, 0.12, 0.10),
        ];
        let config = pixel_config();
        let groups = GreedyRowClusterer.cluster(&elements, &config);
        let pairings = pair_rows(&groups, &config);

        assert_eq!(pairings.len(), 2);
        assert!(matches!(pairings[0], Pairing::LabeledInput { .. }));
        assert!(matches!(pairings[1], Pairing::Standalone(e) if e.id == "solo"));
    }

    #[test]
    fn test_min_confidence() {
        let mut label = element("l", ElementType::Label, 0.1, 0.1);
        let mut input = element("i", ElementType::Input, 0.12, 0.1);
        label.confidence = 92.0;
        input.confidence = 71.0;
        let pairing = Pairing::LabeledInput {
            label: &label,
            input: &input,
        };
        assert_eq!(pairing.min_confidence(), 71.0);
        assert_eq!(pairing.anchor().id, "l");
    }
}
