pub const COMPLETION_SYSTEM_PROMPT: &str =
    "You are a meticulous compliance assistant for heating engineers.";

const DETECTION_PREAMBLE: &str =
    "You are an expert computer vision system for heating compliance detection.";

const CALIBRATION_TASK: &str = "TASK 1: Detect calibration objects for scale measurement
Look for the following objects in priority order:

A) CREDIT CARD (highest priority):
- Standard dimensions with aspect ratio of approximately 1.586:1 (85.6mm x 53.98mm)
- Rectangular shape with rounded corners
- Typically has visible text, numbers, or logos
- Can be any color or design

B) STANDARD BRICK (fallback if no card found):
- Standard UK/Imperial brick dimensions: 215mm x 102.5mm x 65mm
- Red, orange, or clay colored rectangular block
- Often has mortar between bricks
- Look for typical brick texture and appearance
- May be laid horizontally or vertically";

const DETECTION_GUIDELINES: &str = "For EACH object you detect, provide:
1. The exact object type from the list above
2. A confidence score (0.0 to 1.0)
3. Bounding box coordinates as percentages (x, y, width, height) where:
   - x: left edge position (0-100%)
   - y: top edge position (0-100%)
   - width: object width (0-100%)
   - height: object height (0-100%)

Important guidelines:
- Be thorough: detect ALL instances of the listed objects
- Windows: distinguish between \"window\" (fixed) and \"opening_window\" (can open)
- Vents: \"air_vent\" (passive) vs \"fan_vent\" (mechanical)
- Pipes: \"soil_pipe\" (large drainage) vs \"downpipe\" (rainwater)
- Only return objects from the provided list
- Provide accurate bounding boxes that tightly fit each object";

const DETECTION_REPLY_SHAPE: &str = r#"Return ONLY a JSON object in this exact format:
{
  "creditCard": {
    "detected": true,
    "confidence": 0.95,
    "bounds": {"x": 10.0, "y": 80.0, "width": 15.0, "height": 9.5}
  },
  "brick": {
    "detected": true,
    "confidence": 0.90,
    "bounds": {"x": 20.0, "y": 30.0, "width": 18.0, "height": 8.5},
    "orientation": "horizontal"
  },
  "objects": [
    {
      "type": "opening_window",
      "confidence": 0.95,
      "bounds": {"x": 45.5, "y": 20.0, "width": 30.0, "height": 40.0}
    }
  ]
}

If no credit card is detected, set "creditCard" to null.
If no brick is detected, set "brick" to null.
For brick orientation: "horizontal" if width > height, "vertical" if height > width."#;

/// Detection instructions shared by every vision provider; only the way the
/// image travels alongside it differs per provider.
pub fn build_detection_prompt(
    equipment_type: &str,
    categories: &[String],
    user_context: Option<&str>,
) -> String {
    let mut prompt = String::from(DETECTION_PREAMBLE);

    if let Some(context) = user_context.map(str::trim).filter(|c| !c.is_empty()) {
        prompt.push_str(&format!(
            "\n\nUSER CONTEXT: {context}\nPlease take this context into account when analyzing \
             the image. For example, if the user mentions items to be removed or ignored, adjust \
             your detection accordingly."
        ));
    }

    prompt.push_str(&format!(
        "\n\nEQUIPMENT BEING SURVEYED: {equipment_type}\n\n{CALIBRATION_TASK}\n\n\
         TASK 2: Detect compliance objects\n\
         Analyze this image and identify ALL visible objects from this list: {objects}\n\n\
         {DETECTION_GUIDELINES}\n\n{DETECTION_REPLY_SHAPE}",
        objects = categories.join(", "),
    ));

    prompt
}
