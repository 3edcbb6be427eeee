//! Hired hunters bringing meat back to the grill

/// Delivery timer for the hunter crew
#[derive(Debug, Clone)]
pub struct HunterCrew {
    gather_rate: f32,
    timer: f32,
}

impl HunterCrew {
    pub fn new(gather_rate: f32) -> Self {
        Self {
            gather_rate,
            timer: 0.0,
        }
    }

    /// Returns the raw meat delivered this tick, if a delivery is due
    ///
    /// Each hunter brings one steak per delivery. The timer only runs while
    /// someone is on the payroll.
    pub fn advance(&mut self, dt: f32, hunters: u32) -> Option<u32> {
        if hunters == 0 {
            return None;
        }

        self.timer += dt;
        if self.timer >= self.gather_rate {
            self.timer = 0.0;
            return Some(hunters);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_hunters_no_timer() {
        let mut crew = HunterCrew::new(5.0);
        assert_eq!(crew.advance(100.0, 0), None);
        // Hiring later starts from a fresh timer
        assert_eq!(crew.advance(4.0, 1), None);
        assert_eq!(crew.advance(1.0, 1), Some(1));
    }

    #[test]
    fn test_delivery_scales_with_crew() {
        let mut crew = HunterCrew::new(5.0);
        assert_eq!(crew.advance(5.0, 3), Some(3));
        assert_eq!(crew.advance(2.5, 3), None);
        assert_eq!(crew.advance(2.5, 3), Some(3));
    }
}
