use crate::config::CostFlags;
use crate::geometry::Coord;
use crate::optimizer::genotype::Side;

/// True when the net has cells on both sides of the partition.
#[inline]
pub fn is_cut(net: &[usize], sides: &[Side]) -> bool {
    let first = sides[net[0]];
    net[1..].iter().any(|&c| sides[c] != first)
}

pub fn cut_size(nets: &[Vec<usize>], sides: &[Side]) -> u64 {
    nets.iter().filter(|net| is_cut(net, sides)).count() as u64
}

/// Bounding-box half perimeter of one net.
pub fn half_perimeter(net: &[usize], coords: &[Coord], flags: CostFlags) -> u64 {
    let start = coords[net[0]];
    let (mut min_x, mut max_x) = (start.x, start.x);
    let (mut min_y, mut max_y) = (start.y, start.y);

    for &cell in &net[1..] {
        let c = coords[cell];
        min_x = min_x.min(c.x);
        max_x = max_x.max(c.x);
        min_y = min_y.min(c.y);
        max_y = max_y.max(c.y);
    }

    let dx = (max_x - min_x) as u64;
    let dy = (max_y - min_y) as u64;

    let mut hp = if flags.pad_bbox {
        (dx + 1) + (dy + 1)
    } else {
        dx + dy
    };

    if flags.vertical_tracks {
        hp += dy;
    }

    hp
}

pub fn total_wirelength(nets: &[Vec<usize>], coords: &[Coord], flags: CostFlags) -> u64 {
    nets.iter()
        .map(|net| half_perimeter(net, coords, flags))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords(points: &[(u32, u32)]) -> Vec<Coord> {
        points.iter().map(|&(x, y)| Coord { x, y }).collect()
    }

    #[test]
    fn test_single_cell_net_is_never_cut() {
        let sides = vec![Side::Left, Side::Right];
        assert!(!is_cut(&[1], &sides));
    }

    #[test]
    fn test_half_perimeter_flags() {
        let pts = coords(&[(0, 0), (3, 1), (1, 4)]);
        let net = [0, 1, 2];

        assert_eq!(half_perimeter(&net, &pts, CostFlags::default()), 3 + 4);

        let padded = CostFlags {
            pad_bbox: true,
            vertical_tracks: false,
        };
        assert_eq!(half_perimeter(&net, &pts, padded), 4 + 5);

        let tracks = CostFlags {
            pad_bbox: false,
            vertical_tracks: true,
        };
        assert_eq!(half_perimeter(&net, &pts, tracks), 3 + 4 + 4);

        let both = CostFlags {
            pad_bbox: true,
            vertical_tracks: true,
        };
        assert_eq!(half_perimeter(&net, &pts, both), 4 + 5 + 4);
    }
}
