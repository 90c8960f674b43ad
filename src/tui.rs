use crossterm::{
	event::{Event, KeyCode, KeyEvent},
	style::Print,
	QueueableCommand,
};
use std::io::{stderr, stdout, Write};

/// Prompt the user for a line of input.
fn prompt() -> anyhow::Result<String> {
	let _ = stdout().flush();
	let _ = stderr().flush();

	let mut line = String::new();
	while let Event::Key(KeyEvent { code, .. }) = crossterm::event::read()? {
		match code {
			KeyCode::Enter => break,
			KeyCode::Char(c) => line.push(c),
			KeyCode::Backspace => {
				line.pop();
			}
			_ => {}
		}
	}

	Ok(line)
}

/// Prompt the user for a single character response. Useful for asking yes or no questions.
///
/// `chars` should be all lowercase characters, with at most 1 uppercase character. The uppercase character is the default answer if no answer is provided.
pub(crate) fn prompt_char(text: &str, chars: &str) -> anyhow::Result<char> {
	loop {
		let _ = stderr().queue(Print(format!("{} [{}] ", text, chars)));
		let _ = stderr().flush();
		let input = prompt()?;
		let _ = writeln!(stderr());
		if let Ok(c) = parse_answer(input, chars) {
			return Ok(c);
		}
	}
}

fn parse_answer<T>(input: T, chars: &str) -> anyhow::Result<char>
where
	T: Into<String>,
{
	let uppers = chars.replace(char::is_lowercase, "");
	ensure!(
		uppers.len() <= 1,
		"Invalid chars for prompt_char. Maximum 1 uppercase letter is allowed."
	);
	let default_answer = uppers.chars().next().map(|c| c.to_ascii_lowercase());

	let answer: String = input.into().trim().to_ascii_lowercase();
	let mut answer_chars = answer.chars();
	match (answer_chars.next(), answer_chars.next()) {
		(None, _) => default_answer.ok_or_else(|| anyhow!("no valid answer")),
		(Some(_), Some(_)) => bail!("answer too long"),
		(Some(c), None) if chars.to_ascii_lowercase().contains(c) => Ok(c),
		_ => bail!("no valid answer"),
	}
}
