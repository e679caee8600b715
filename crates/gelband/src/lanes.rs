//! Grouping of detected band rectangles into lanes by horizontal overlap.

use crate::store::Band;
use crate::Rect;

/// True when the x-spans of `a` and `b` overlap.
fn spans_overlap(a: &Rect, b: &Rect) -> bool {
    a.right().max(b.right()) - a.x.min(b.x) < (a.width + b.width) as i32
}

/// Partition bands into lanes of shared horizontal extent.
///
/// Bands are sorted by ascending x then y, and each is placed into the first
/// lane containing ANY member whose x-span overlaps it; if none qualifies a
/// new lane is opened. The any-member test matters: lanes can hold staggered
/// bands whose spans only partially overlap pairwise along the lane, so
/// comparing against the most recent member alone misclassifies them. The
/// O(lanes × lane-size) cost is acceptable at the expected band counts (tens,
/// not thousands).
///
/// Lane order is ascending leftmost-x; each lane's members end up sorted by
/// ascending y (top-to-bottom). Membership is independent of input order.
pub fn group_into_lanes(mut bands: Vec<Band>) -> Vec<Vec<Band>> {
    bands.sort_by_key(|band| (band.rect.x, band.rect.y));

    let mut lanes: Vec<Vec<Band>> = Vec::new();
    for band in bands {
        let home = lanes
            .iter_mut()
            .find(|lane| lane.iter().any(|member| spans_overlap(&member.rect, &band.rect)));
        match home {
            Some(lane) => lane.push(band),
            None => lanes.push(vec![band]),
        }
    }

    for lane in &mut lanes {
        lane.sort_by_key(|band| band.rect.y);
    }
    lanes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn band(x: i32, y: i32, w: u32, h: u32) -> Band {
        Band::new(x, y, w, h, 0)
    }

    #[test]
    fn x_overlapping_bands_share_a_lane() {
        let lanes = group_into_lanes(vec![band(0, 0, 10, 5), band(5, 20, 10, 5)]);
        assert_eq!(lanes.len(), 1);
        assert_eq!(lanes[0].len(), 2);
    }

    #[test]
    fn x_disjoint_bands_get_separate_lanes() {
        let lanes = group_into_lanes(vec![band(0, 0, 10, 5), band(20, 0, 10, 5)]);
        assert_eq!(lanes.len(), 2);
    }

    #[test]
    fn touching_spans_do_not_overlap() {
        // [0, 10) and [10, 20): adjacent but disjoint.
        let lanes = group_into_lanes(vec![band(0, 0, 10, 5), band(10, 0, 10, 5)]);
        assert_eq!(lanes.len(), 2);
    }

    #[test]
    fn staggered_bands_group_through_any_member() {
        // c overlaps a but not b. After the x-sort b is the lane's most
        // recent member, so last-member chaining would split c off; the
        // any-member test keeps all three together.
        let a = band(0, 0, 10, 5);
        let b = band(2, 10, 4, 5);
        let c = band(7, 20, 3, 5);
        assert!(!spans_overlap(&b.rect, &c.rect));
        assert!(spans_overlap(&a.rect, &c.rect));
        let lanes = group_into_lanes(vec![a, b, c]);
        assert_eq!(lanes.len(), 1);
        assert_eq!(lanes[0].len(), 3);
    }

    #[test]
    fn membership_is_input_order_independent() {
        let rects = [
            band(0, 40, 12, 6),
            band(4, 0, 12, 6),
            band(30, 10, 8, 6),
            band(2, 20, 10, 6),
            band(33, 30, 8, 6),
        ];
        let baseline = group_into_lanes(rects.to_vec());

        // A handful of distinct permutations; membership and order must match.
        let permutations: [[usize; 5]; 4] = [
            [4, 3, 2, 1, 0],
            [2, 0, 4, 1, 3],
            [1, 4, 0, 3, 2],
            [3, 2, 1, 4, 0],
        ];
        for perm in permutations {
            let shuffled: Vec<Band> = perm.iter().map(|&i| rects[i]).collect();
            assert_eq!(group_into_lanes(shuffled), baseline);
        }
    }

    #[test]
    fn lanes_are_ordered_by_leftmost_x_and_members_by_y() {
        let lanes = group_into_lanes(vec![
            band(50, 5, 10, 5),
            band(0, 30, 10, 5),
            band(2, 10, 10, 5),
        ]);
        assert_eq!(lanes.len(), 2);
        assert_eq!(lanes[0][0].rect.y, 10);
        assert_eq!(lanes[0][1].rect.y, 30);
        assert_eq!(lanes[1][0].rect.x, 50);
    }

    #[test]
    fn empty_input_yields_no_lanes() {
        assert!(group_into_lanes(Vec::new()).is_empty());
    }
}
