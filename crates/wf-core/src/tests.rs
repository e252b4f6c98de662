//! Unit tests for wf-core primitives.

#[cfg(test)]
mod ids {
    use crate::{NodeId, RouteId};

    #[test]
    fn index_roundtrip() {
        let id = NodeId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(NodeId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinel_is_max() {
        assert_eq!(NodeId::INVALID.0, u32::MAX);
        assert_eq!(RouteId::INVALID.0, u64::MAX);
    }

    #[test]
    fn route_generations_advance() {
        assert_eq!(RouteId(0).next(), RouteId(1));
        assert!(RouteId(3) < RouteId(3).next());
    }

    #[test]
    fn display() {
        assert_eq!(NodeId(7).to_string(), "NodeId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::Point;

    #[test]
    fn euclidean_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(b.distance(a), 5.0);
    }

    #[test]
    fn headings_follow_y_up_frame() {
        let o = Point::new(0.0, 0.0);
        assert_eq!(o.heading_deg(Point::new(1.0, 0.0)), 0.0);
        assert_eq!(o.heading_deg(Point::new(0.0, 1.0)), 90.0);
        assert_eq!(o.heading_deg(Point::new(-1.0, 0.0)), 180.0);
        assert_eq!(o.heading_deg(Point::new(0.0, -1.0)), -90.0);
    }
}

#[cfg(test)]
mod node {
    use crate::{Category, NodeKind};

    #[test]
    fn category_tags_fold_case_and_separators() {
        assert_eq!(Category::parse("Toilet-Male"), Category::ToiletMale);
        assert_eq!(Category::parse("toilet_male"), Category::ToiletMale);
        assert_eq!(Category::parse("MaleToilet"), Category::ToiletMale);
        assert_eq!(Category::parse("Toilet-Female"), Category::ToiletFemale);
        assert_eq!(Category::parse(" staircase "), Category::Staircase);
        assert_eq!(Category::parse("Restroom"), Category::Toilet);
        assert_eq!(Category::parse("Lift"), Category::Other("lift".into()));
    }

    #[test]
    fn custom_tags_fold_like_built_in_ones() {
        assert_eq!(Category::parse("ATM"), Category::parse("atm"));
        assert_eq!(Category::parse("Cash-Machine"), Category::parse("cash machine"));
        assert_eq!(Category::parse("ATM").to_string(), "atm");
    }

    #[test]
    fn category_display_roundtrips() {
        for c in [
            Category::Staircase,
            Category::Gateway,
            Category::ToiletMale,
            Category::ToiletFemale,
            Category::Toilet,
            Category::Other("lift".into()),
        ] {
            assert_eq!(Category::parse(&c.to_string()), c);
        }
    }

    #[test]
    fn landmarks() {
        assert!(Category::Staircase.is_landmark());
        assert!(Category::ToiletFemale.is_landmark());
        assert!(Category::parse("Toilet").is_landmark());
        assert!(!Category::parse("Cafe").is_landmark());
    }

    #[test]
    fn node_kind_parse() {
        assert_eq!("waypoint".parse::<NodeKind>().unwrap(), NodeKind::Waypoint);
        assert_eq!("".parse::<NodeKind>().unwrap(), NodeKind::Location);
        assert!("corridor".parse::<NodeKind>().is_err());
    }
}

#[cfg(test)]
mod config {
    use crate::{CoreError, WayfinderConfig};

    #[test]
    fn defaults_are_valid() {
        let config = WayfinderConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.narration.step_interval().as_secs(), 4);
        assert!(config.normalizer.fillers.iter().any(|f| f == "nearest"));
    }

    #[test]
    fn zero_interval_rejected() {
        let mut config = WayfinderConfig::default();
        config.narration.step_interval_ms = 0;
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn blank_filler_rejected() {
        let mut config = WayfinderConfig::default();
        config.normalizer.fillers.push("   ".into());
        assert!(config.validate().is_err());
    }
}
