use strum_macros::IntoStaticStr;

pub const EVENT_CATEGORY: &str = "HotDogPage";

#[derive(Debug, Clone, PartialEq, Eq, IntoStaticStr)]
pub enum AnalyticsEvent {
    #[strum(serialize = "hotdog_page_load")]
    PageLoad,
    #[strum(serialize = "hotdog_thumbnail_click")]
    ThumbnailClick(String),
    #[strum(serialize = "hotdog_detect_click")]
    DetectClick,
    #[strum(serialize = "hotdog_detection_result")]
    DetectionResult(String),
}

impl AnalyticsEvent {
    pub fn name(&self) -> &'static str {
        self.into()
    }

    pub fn category(&self) -> &'static str {
        EVENT_CATEGORY
    }

    pub fn label(&self) -> &str {
        match self {
            AnalyticsEvent::PageLoad => "Page Loaded",
            AnalyticsEvent::ThumbnailClick(path) => path,
            AnalyticsEvent::DetectClick => "Detect Button Clicked",
            AnalyticsEvent::DetectionResult(verdict) => verdict,
        }
    }
}

/// Fire-and-forget sink for analytics events. Implementations must not
/// block and must swallow their own failures.
pub trait AnalyticsReporter {
    fn report(&self, event: &AnalyticsEvent);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_carry_gtag_names_and_labels() {
        let event = AnalyticsEvent::ThumbnailClick("/images/car.jpg".into());
        assert_eq!(event.name(), "hotdog_thumbnail_click");
        assert_eq!(event.label(), "/images/car.jpg");
        assert_eq!(event.category(), "HotDogPage");

        assert_eq!(AnalyticsEvent::DetectClick.name(), "hotdog_detect_click");
        assert_eq!(AnalyticsEvent::PageLoad.label(), "Page Loaded");

        let result = AnalyticsEvent::DetectionResult("Probably a sausage".into());
        assert_eq!(result.name(), "hotdog_detection_result");
        assert_eq!(result.label(), "Probably a sausage");
    }
}
