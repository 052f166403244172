/// Cost of entering a wall, or a finish cell from the wrong direction.
///
/// Large enough that any route through a wall loses to every open route of
/// realistic length, yet far enough below `f64::MAX` that adding further
/// edge costs can never overflow.
pub const IMPASSABLE: f64 = f64::MAX / 1e6;

/// Edge-cost parameters for [`PathFinder`](crate::PathFinder).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchCosts {
    /// Base cost of entering an open cell away from walls.
    pub open: f64,
    /// Base cost of entering an open cell with a wall among its neighbours.
    /// Should exceed `open`.
    pub near_wall: f64,
    /// Scale of the turn penalty `direction_penalty * (1 - cos θ)`.
    pub direction_penalty: f64,
    /// Cost of an edge that must never be taken.
    pub impassable: f64,
}

impl Default for SearchCosts {
    fn default() -> Self {
        Self {
            open: 1.0,
            near_wall: 2.0,
            direction_penalty: 0.001,
            impassable: IMPASSABLE,
        }
    }
}

impl SearchCosts {
    /// Create a new set of costs with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for the near-wall cost.
    pub fn with_near_wall(mut self, cost: f64) -> Self {
        self.near_wall = cost;
        self
    }

    /// Builder-style setter for the open-cell cost.
    pub fn with_open(mut self, cost: f64) -> Self {
        self.open = cost;
        self
    }

    /// Builder-style setter for the turn penalty coefficient.
    pub fn with_direction_penalty(mut self, coefficient: f64) -> Self {
        self.direction_penalty = coefficient;
        self
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn costs_round_trip() {
        let c = SearchCosts::new().with_near_wall(4.0);
        let json = serde_json::to_string(&c).unwrap();
        let back: SearchCosts = serde_json::from_str(&json).unwrap();
        assert_eq!(c, back);
    }

    #[test]
    fn impassable_survives_json_exactly() {
        let json = serde_json::to_string(&SearchCosts::default()).unwrap();
        let back: SearchCosts = serde_json::from_str(&json).unwrap();
        assert_eq!(back.impassable.to_bits(), IMPASSABLE.to_bits());
    }
}
