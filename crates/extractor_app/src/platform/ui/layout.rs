pub const TITLE: &str = "Image Secret Message Extractor";
pub const SUBTITLE: &str = "Upload an image to retrieve your secret message";

pub fn banner(endpoint: &str) -> Vec<String> {
    vec![
        format!("== {TITLE} =="),
        SUBTITLE.to_string(),
        format!("Decoding service: {endpoint}"),
        "Type `help` for commands.".to_string(),
    ]
}

pub fn help_lines() -> Vec<String> {
    [
        "select <path>   choose an image (PNG, JPG, JPEG up to 10MB)",
        "submit          extract the hidden message from the selected image",
        "reset           clear the selection and any result",
        "help            show this list",
        "quit            leave",
    ]
    .iter()
    .map(|line| line.to_string())
    .collect()
}
