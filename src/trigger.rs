use crate::error::Error;

/// Default distance from the bottom of the content under which pagination
/// starts.
pub const DEFAULT_THRESHOLD: f64 = 64.0;

/// Checks that a threshold is a usable distance.
///
/// # Errors
/// [`Error::InvalidThreshold`] for negative, infinite and NaN distances.
pub fn validate_threshold(threshold: f64) -> Result<f64, Error> {
    if threshold.is_finite() && threshold >= 0.0 {
        Ok(threshold)
    } else {
        Err(Error::InvalidThreshold(threshold))
    }
}

/// Scroll position of the list as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollGeometry {
    /// Vertical scroll offset of the content
    pub offset_y: f64,
    /// Total height of the scrollable content
    pub content_height: f64,
    /// Height of the visible viewport
    pub viewport_height: f64,
}

impl ScrollGeometry {
    pub fn new(offset_y: f64, content_height: f64, viewport_height: f64) -> Self {
        Self {
            offset_y,
            content_height,
            viewport_height,
        }
    }

    /// Distance between the bottom edge of the viewport and the end of the
    /// content. Negative when overscrolled past the end.
    pub fn distance_from_bottom(&self) -> f64 {
        self.content_height - self.viewport_height - self.offset_y
    }
}

/// Decides when scrolling should start pagination.
///
/// The decision itself is [`should_fire`]. On top of it the trigger keeps a
/// latch: once it fired it stays silent until [`LoadMoreTrigger::rearm`] is
/// called, which the controller does every time it recomputes whether it is
/// watching for load-more.
#[derive(Debug, Clone)]
pub struct LoadMoreTrigger {
    threshold: f64,
    armed: bool,
}

impl Default for LoadMoreTrigger {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl LoadMoreTrigger {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            armed: true,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn set_threshold(&mut self, threshold: f64) {
        self.threshold = threshold;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn rearm(&mut self) {
        self.armed = true;
    }

    /// Evaluates a scroll position and disarms the trigger when it fires.
    ///
    /// # Arguments
    /// * `geometry` - The current scroll position
    /// * `watching` - Whether the controller is watching for load-more
    /// * `error_view` - Whether the footer currently shows a load-more error
    pub fn evaluate(&mut self, geometry: &ScrollGeometry, watching: bool, error_view: bool) -> bool {
        if !self.armed {
            return false;
        }

        let fire = should_fire(
            geometry.distance_from_bottom(),
            self.threshold,
            watching,
            error_view,
        );
        if fire {
            self.armed = false;
        }
        fire
    }
}

/// The firing rule. A visible error view suppresses automatic retries; the
/// user has to ask again explicitly.
pub fn should_fire(distance_from_bottom: f64, threshold: f64, watching: bool, error_view: bool) -> bool {
    watching && !error_view && distance_from_bottom < threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_from_bottom() {
        let geometry = ScrollGeometry::new(100.0, 1000.0, 600.0);
        assert_eq!(geometry.distance_from_bottom(), 300.0);

        let overscrolled = ScrollGeometry::new(450.0, 1000.0, 600.0);
        assert_eq!(overscrolled.distance_from_bottom(), -50.0);
    }

    #[test]
    fn test_should_fire_rule() {
        assert!(should_fire(10.0, 64.0, true, false));
        assert!(!should_fire(10.0, 64.0, false, false));
        assert!(!should_fire(10.0, 64.0, true, true));
        assert!(!should_fire(64.0, 64.0, true, false));
        assert!(!should_fire(200.0, 64.0, true, false));
    }

    #[test]
    fn test_trigger_latches_after_firing() {
        let mut trigger = LoadMoreTrigger::default();
        let near_bottom = ScrollGeometry::new(390.0, 1000.0, 600.0);

        assert!(trigger.evaluate(&near_bottom, true, false));
        assert!(!trigger.is_armed());
        assert!(!trigger.evaluate(&near_bottom, true, false));

        trigger.rearm();
        assert!(trigger.evaluate(&near_bottom, true, false));
    }

    #[test]
    fn test_trigger_stays_armed_when_not_firing() {
        let mut trigger = LoadMoreTrigger::new(64.0);
        let far = ScrollGeometry::new(0.0, 1000.0, 600.0);

        assert!(!trigger.evaluate(&far, true, false));
        assert!(trigger.is_armed());
    }

    #[test]
    fn test_validate_threshold() {
        assert_eq!(validate_threshold(0.0).unwrap(), 0.0);
        assert_eq!(validate_threshold(DEFAULT_THRESHOLD).unwrap(), 64.0);
        assert!(matches!(
            validate_threshold(-1.0),
            Err(Error::InvalidThreshold(_))
        ));
        assert!(validate_threshold(f64::NAN).is_err());
        assert!(validate_threshold(f64::INFINITY).is_err());
    }

    #[test]
    fn test_threshold_update() {
        let mut trigger = LoadMoreTrigger::new(64.0);
        let geometry = ScrollGeometry::new(300.0, 1000.0, 600.0);

        assert!(!trigger.evaluate(&geometry, true, false));
        trigger.set_threshold(128.0);
        assert_eq!(trigger.threshold(), 128.0);
        assert!(trigger.evaluate(&geometry, true, false));
    }
}
