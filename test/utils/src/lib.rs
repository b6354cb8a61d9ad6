/// A multi-paragraph bot reply with lightweight markup, as the chat backend
/// tends to return them.
pub fn markup_reply_fixture() -> &'static str {
    return r#"
**Sea surface temperature, Pacific (2019-2023)**

- Mean anomaly: +0.42 °C
- Floats reporting: 1,204

| Year | Mean (°C) |
|------|-----------|
| 2022 | 18.91     |
| 2023 | 19.12     |
"#
    .trim();
}

pub fn long_question_fixture() -> &'static str {
    return "Show me temperature trends in the Pacific Ocean over the last ten years";
}
