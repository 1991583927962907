//! The `memoraid init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create memoraid.toml
    if std::path::Path::new("memoraid.toml").exists() {
        println!("memoraid.toml already exists, skipping.");
    } else {
        std::fs::write("memoraid.toml", SAMPLE_CONFIG)?;
        println!("Created memoraid.toml");
    }

    // Create example journal
    std::fs::create_dir_all("journals")?;
    let example_path = std::path::Path::new("journals/example.toml");
    if example_path.exists() {
        println!("journals/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_JOURNAL)?;
        println!("Created journals/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit memoraid.toml with your API key");
    println!("  2. Run: memoraid validate --journal journals/example.toml");
    println!("  3. Run: memoraid generate --journal journals/example.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# memoraid configuration

default_provider = "gemini"
default_model = "gemini-pro"
default_temperature = 0.7
parallelism = 4
daily_question_limit = 5

[providers.gemini]
type = "gemini"
api_key = "${GEMINI_API_KEY}"
"#;

const EXAMPLE_JOURNAL: &str = r#"[journal]
id = "example"
name = "Example Journal"
description = "A small example journal to get started"

[[memories]]
id = "lake-party"
description = """
We threw a surprise birthday party for you at the lake house in July.
Maya grilled corn, and everyone swam until the sun went down.
"""
event_date = "2019-07-14"

[memories.contributor]
name = "Maya"
email = "maya@example.com"
relationship = "friend"
years = 12

[[memories]]
id = "first-concert"
description = """
Your first concert was an open-air show downtown. It rained halfway
through and nobody left. You kept the soaked ticket stub for years.
"""

[memories.contributor]
name = "Sam"
email = "sam@example.com"
relationship = "family"
years = 30

[[memories.questions]]
question = "What did you keep from that night?"
correct_answer = "the soaked ticket stub"
difficulty = 2
points = 10
"#;
