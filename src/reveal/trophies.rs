use crate::animation::{Animation, Easing, Keyframe, Length};
use crate::config::RevealConfig;
use crate::constants::*;
use crate::document::{Document, ElementId};
use crate::scheduler::{Scheduler, Task, TimerHandle};

/// Entry offsets for the three trophies: from the left, from the top, from the right.
const ENTRIES: [(Length, Length); 3] = [
    (Length::Vw(-100.0), Length::Px(0.0)),
    (Length::Px(0.0), Length::Vh(-50.0)),
    (Length::Vw(100.0), Length::Px(0.0)),
];

const TROPHY_EASING: Easing = Easing::CubicBezier(0.2, 0.8, 0.2, 1.0);

fn trophy_images<D: Document>(doc: &D) -> Vec<ElementId> {
    doc.elements_by_class(TROPHY_CARD_CLASS)
        .into_iter()
        .flat_map(|card| doc.descendants_by_class(card, TROPHY_IMAGE_CLASS))
        .collect()
}

fn trophy_texts<D: Document>(doc: &D) -> Vec<ElementId> {
    doc.elements_by_class(TROPHY_CARD_CLASS)
        .into_iter()
        .flat_map(|card| doc.descendants_by_tag(card, &["h3", "p"]))
        .collect()
}

/// Flies the trophies in and schedules the text fade-in to start
/// `text_lead_ms` before the last trophy lands.
pub fn animate_trophies<D: Document>(doc: &mut D, timers: &mut Scheduler, config: &RevealConfig) -> TimerHandle {
    let now = timers.now_ms();
    let mut longest: u64 = 0;
    for (index, (trophy, (x, y))) in trophy_images(doc).into_iter().zip(ENTRIES).enumerate() {
        let delay = index as u64 * config.trophy_stagger_ms;
        doc.animate(
            trophy,
            Animation {
                from: Keyframe::new(x, y, 0.5, 0.0),
                to: Keyframe::new(Length::Px(0.0), Length::Px(0.0), 1.0, 1.0),
                start_ms: now,
                delay_ms: delay,
                duration_ms: config.trophy_duration_ms,
                easing: TROPHY_EASING,
            },
        );
        longest = longest.max(config.trophy_duration_ms + delay);
    }
    timers.after(longest.saturating_sub(config.text_lead_ms), Task::RevealTrophyTexts)
}

/// Fades and slides each trophy caption in, staggered in document order.
pub fn animate_texts<D: Document>(doc: &mut D, now_ms: u64, config: &RevealConfig) {
    for (index, text) in trophy_texts(doc).into_iter().enumerate() {
        doc.animate(
            text,
            Animation {
                from: Keyframe::new(Length::Px(0.0), Length::Px(20.0), 1.0, 0.0),
                to: Keyframe::new(Length::Px(0.0), Length::Px(0.0), 1.0, 1.0),
                start_ms: now_ms,
                delay_ms: index as u64 * config.text_stagger_ms,
                duration_ms: config.text_duration_ms,
                easing: Easing::EaseOut,
            },
        );
    }
}
