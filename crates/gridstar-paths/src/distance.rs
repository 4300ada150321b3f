use gridstar_core::Point;

/// Manhattan (L1) distance between two points.
///
/// Admissible and consistent for 4-connected unit-cost movement.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_is_symmetric() {
        let a = Point::new(-2, 5);
        let b = Point::new(3, 1);
        assert_eq!(manhattan(a, b), 9);
        assert_eq!(manhattan(b, a), 9);
        assert_eq!(manhattan(a, a), 0);
    }

    #[test]
    fn manhattan_counts_axis_steps() {
        assert_eq!(manhattan(Point::new(0, 0), Point::new(4, 4)), 8);
        assert_eq!(manhattan(Point::new(1, 7), Point::new(1, 2)), 5);
    }
}
