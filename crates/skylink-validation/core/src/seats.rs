// File: src/seats.rs
// Purpose: Seat picker - bounded selection mirrored into the selected_seats field

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SeatsConfig;
use crate::notice::Notice;

/// One seat on the cabin map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub id: String,
    #[serde(default)]
    pub booked: bool,
    #[serde(default)]
    pub selected: bool,
}

impl Seat {
    pub fn open(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            booked: false,
            selected: false,
        }
    }

    pub fn booked(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            booked: true,
            selected: false,
        }
    }
}

/// What a click on a seat did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeatToggle {
    Selected,
    Deselected,
    /// Already holding `max_seats`; nothing changed
    LimitReached(Notice),
    /// Booked or not on the map; nothing changed
    Unavailable,
}

/// Seats in layout order plus the selection cap.
///
/// Never holds more than `max_seats` selected seats.
#[derive(Debug, Clone)]
pub struct SeatMap {
    seats: Vec<Seat>,
    max_seats: usize,
}

impl SeatMap {
    /// A cap below one is raised to one.
    pub fn new(seats: Vec<Seat>, max_seats: usize) -> Self {
        let mut map = Self {
            seats,
            max_seats: max_seats.max(1),
        };
        map.normalise();
        map
    }

    /// Reads the page's `max-seats` value; when it is missing or unparsable
    /// the configured `max_seats` applies.
    pub fn with_max_seats_attr(seats: Vec<Seat>, max_seats: Option<&str>, config: &SeatsConfig) -> Self {
        let max = max_seats
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .unwrap_or(config.max_seats);
        Self::new(seats, max)
    }

    // Booked seats cannot be selected, and pre-selected seats beyond the cap are dropped
    fn normalise(&mut self) {
        let mut kept = 0;
        for seat in &mut self.seats {
            if seat.booked {
                seat.selected = false;
            } else if seat.selected {
                if kept < self.max_seats {
                    kept += 1;
                } else {
                    seat.selected = false;
                }
            }
        }
    }

    pub fn max_seats(&self) -> usize {
        self.max_seats
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn selected_count(&self) -> usize {
        self.seats.iter().filter(|s| s.selected).count()
    }

    /// Selected seat ids in layout order
    pub fn selected(&self) -> Vec<&str> {
        self.seats
            .iter()
            .filter(|s| s.selected)
            .map(|s| s.id.as_str())
            .collect()
    }

    /// Value for the `selected_seats` hidden input
    pub fn hidden_value(&self) -> String {
        self.selected().join(",")
    }

    pub fn toggle(&mut self, id: &str) -> SeatToggle {
        let count = self.selected_count();
        let max = self.max_seats;

        let Some(seat) = self.seats.iter_mut().find(|s| s.id == id) else {
            return SeatToggle::Unavailable;
        };
        if seat.booked {
            return SeatToggle::Unavailable;
        }

        if seat.selected {
            seat.selected = false;
            debug!("Seat {} deselected", id);
            SeatToggle::Deselected
        } else if count < max {
            seat.selected = true;
            debug!("Seat {} selected ({}/{})", id, count + 1, max);
            SeatToggle::Selected
        } else {
            SeatToggle::LimitReached(Notice::warning(format!(
                "You can only select {} seat(s)",
                max
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use pretty_assertions::assert_eq;

    fn cabin() -> Vec<Seat> {
        vec![
            Seat::open("1A"),
            Seat::booked("1B"),
            Seat::open("1C"),
            Seat::open("2A"),
        ]
    }

    #[test]
    fn test_select_up_to_cap() {
        let mut map = SeatMap::new(cabin(), 2);
        assert_eq!(map.toggle("2A"), SeatToggle::Selected);
        assert_eq!(map.toggle("1A"), SeatToggle::Selected);
        assert_eq!(
            map.toggle("1C"),
            SeatToggle::LimitReached(Notice::warning("You can only select 2 seat(s)"))
        );
        assert_eq!(map.selected_count(), 2);
        // Layout order, not click order
        assert_eq!(map.hidden_value(), "1A,2A");
    }

    #[test]
    fn test_deselect_frees_a_slot() {
        let mut map = SeatMap::new(cabin(), 1);
        map.toggle("1A");
        assert_eq!(map.toggle("1A"), SeatToggle::Deselected);
        assert_eq!(map.hidden_value(), "");
        assert_eq!(map.toggle("1C"), SeatToggle::Selected);
        assert_eq!(map.hidden_value(), "1C");
    }

    #[test]
    fn test_booked_and_unknown_seats() {
        let mut map = SeatMap::new(cabin(), 3);
        assert_eq!(map.toggle("1B"), SeatToggle::Unavailable);
        assert_eq!(map.toggle("9Z"), SeatToggle::Unavailable);
        assert_eq!(map.selected_count(), 0);
    }

    #[test]
    fn test_max_seats_attr() {
        let defaults = SeatsConfig::default();
        assert_eq!(SeatMap::with_max_seats_attr(cabin(), Some("3"), &defaults).max_seats(), 3);
        assert_eq!(SeatMap::with_max_seats_attr(cabin(), Some("x"), &defaults).max_seats(), 1);
        assert_eq!(SeatMap::with_max_seats_attr(cabin(), None, &defaults).max_seats(), 1);
        assert_eq!(SeatMap::new(cabin(), 0).max_seats(), 1);
    }

    #[test]
    fn test_configured_fallback_cap() {
        let config = Config::parse("[seats]\nmax_seats = 4").unwrap();
        let map = SeatMap::with_max_seats_attr(cabin(), None, &config.seats);
        assert_eq!(map.max_seats(), 4);

        let map = SeatMap::with_max_seats_attr(cabin(), Some(" two "), &config.seats);
        assert_eq!(map.max_seats(), 4);

        // The page value wins when it parses
        let map = SeatMap::with_max_seats_attr(cabin(), Some("2"), &config.seats);
        assert_eq!(map.max_seats(), 2);
    }

    #[test]
    fn test_preselected_seats_respect_cap() {
        let mut seats = cabin();
        for seat in &mut seats {
            seat.selected = true;
        }
        let map = SeatMap::new(seats, 2);
        assert_eq!(map.selected(), vec!["1A", "1C"]);
    }
}
