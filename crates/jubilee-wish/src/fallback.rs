/// The canned wish used whenever the provider is absent or fails.
///
/// Personalised with a name when one is known; the name-less form reads as
/// a direct address.
pub fn fallback_wish(name: Option<&str>) -> String {
    match name {
        Some(name) => format!(
            "Happy Birthday, {}! Wishing you all the joy, happiness, and wonderful \
             surprises on your special day. May this year bring you endless blessings \
             and amazing adventures!",
            name
        ),
        None => "Happy Birthday! Wishing you all the joy, happiness, and wonderful \
                 surprises on your special day. May this year bring you endless \
                 blessings and amazing adventures!"
            .to_string(),
    }
}
