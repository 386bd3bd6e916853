use crate::memory_sketches::enums::sketch_style::SketchStyle;

pub const NEGATIVE_PROMPT: &str = "color, colorful, photorealistic, photograph, smooth shading, \
professional illustration, symmetrical, clean lines, detailed background, watermark, text";

pub const BACKSTORY_SYSTEM_INSTRUCTION: &str = "You are a creative but safe backstory generator. \
Everything you write is fiction. Never claim to know who the person really is, never guess their \
name, age, ethnicity or any real identity, and never mention that you are looking at a photo or \
an image. Avoid anything offensive, racial, political or violent.";

pub const BACKSTORY_USER_INSTRUCTION: &str = "Write a short, mistaken backstory for the police \
composite sketch of this 'suspect'. The story must be intentionally wrong and slightly humorous, \
two to three sentences, told like a confused witness describing the wrong person.";

/// Returns the `(system, user)` instruction pair for a style.
pub fn style_instructions(style: SketchStyle) -> (&'static str, &'static str) {
    match style {
        SketchStyle::PoliceComposite => (
            "Black and white only, pencil on rough paper, monochrome.",
            "Crude police composite sketch of the person in the reference image, uneven line \
quality, inaccurate proportions, amateur witness drawing, simplified shading, low detail, \
slightly distorted facial features, grainy pencil texture.",
        ),
        SketchStyle::ChildSketch => (
            "Black and white pencil drawing, monochrome, no color at all.",
            "A police sketch of the person in the reference image drawn by a seven year old \
child, wobbly asymmetric lines, oversized head, stick-like shoulders, scribbled hair, \
deliberately bad and hand drawn.",
        ),
        SketchStyle::LineArt => (
            "Monochrome line art, black ink on white paper, no shading, no color.",
            "Shaky single-weight line drawing of the person in the reference image, asymmetric \
features, lines that do not quite meet, drawn from memory by someone in a hurry.",
        ),
        SketchStyle::PencilSketch => (
            "Graphite pencil on off-white paper, grayscale only.",
            "Rough hand drawn pencil portrait of the person in the reference image, visible \
construction lines, smudged cross-hatching, lopsided eyes, unfinished edges.",
        ),
    }
}

pub fn compose_prompt(system_instruction: &str, user_instruction: &str) -> String {
    [user_instruction, " ", system_instruction].concat()
}

pub fn style_prompt(style: SketchStyle) -> String {
    let (system_instruction, user_instruction) = style_instructions(style);
    compose_prompt(system_instruction, user_instruction)
}

/// Edit endpoints take no negative prompt, so the terms to avoid are spelled out.
pub fn edit_prompt(style: SketchStyle) -> String {
    [&style_prompt(style), " Avoid: ", NEGATIVE_PROMPT, "."].concat()
}
