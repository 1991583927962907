//! The `memoraid score` command.

use anyhow::Result;

use memoraid_core::scoring::evaluate;

pub fn execute(reference: &str, answer: &str, points: u32) -> Result<()> {
    anyhow::ensure!(
        !reference.trim().is_empty(),
        "reference answer must not be empty"
    );

    let result = evaluate(answer, reference, points);

    println!("Match ratio: {:.1}%", result.match_ratio * 100.0);
    println!(
        "Verdict: {}",
        if result.is_correct { "correct" } else { "incorrect" }
    );
    println!("Points awarded: {}", result.points_awarded);

    Ok(())
}
