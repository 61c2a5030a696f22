//! Fixed prompt texts sent to the generation models.

/// Instruction sent with a logo to strip its background.
pub const BACKGROUND_REMOVAL_INSTRUCTION: &str = "Remove the background from this logo. Make the background fully transparent. The output must be a PNG image.";

/// Prompt used to animate a generated banner image.
pub const VIDEO_ANIMATION_PROMPT: &str = "Gently animate this festive image. Add subtle, elegant golden sparkles and a soft, slow zoom effect to make it feel magical and luxurious.";

/// Build the background-image prompt for a festival.
///
/// The image must leave room for text overlays and contain no text itself.
pub fn banner_image_prompt(festival_name: &str) -> String {
    format!(
        "Create a visually stunning, high-resolution banner image for a luxury Indian jewellery brand advertisement celebrating the '{festival}' festival. \
The image should be elegant, divine, and festive. \
Key elements should include traditional motifs associated with {festival}, a soft golden divine light, and rich, warm colors. \
The composition should have ample, clean, and subtly blurred background space, especially on the right and center, to allow for text overlays. \
Do not include any text in the image. Focus on creating a beautiful, atmospheric background.",
        festival = festival_name
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_prompt_embeds_festival_twice() {
        let prompt = banner_image_prompt("Holi");
        assert!(prompt.contains("celebrating the 'Holi' festival"));
        assert!(prompt.contains("motifs associated with Holi,"));
        assert!(prompt.contains("Do not include any text in the image."));
    }
}
