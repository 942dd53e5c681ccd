use std::cmp;
use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use dynarr::{DynArr, Error};
use memchr::{memchr2, memchr3};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Greets you, assembling the greeting in a DynArr<u8>
#[derive(Parser, Debug)]
#[command(name = "hello")]
struct Cli {
	/// Text that goes in front of the name
	#[arg(long, default_value = "hello, ")]
	greeting: String,

	/// Bytes to reserve for the name upfront
	#[arg(long, default_value_t = 1024)]
	reserve: usize,

	/// Use this name instead of asking for one
	#[arg(long)]
	name: Option<String>,
}

fn is_blank(c: u8) -> bool {
	c.is_ascii_whitespace()
}

/*
Appends next word from `input` to `out`, one byte at a time.
Words end at ASCII whitespace or at EOF.
Leading whitespace is skipped; the delimiter after the word is consumed.
Returns number of bytes appended, 0 on EOF.
*/
fn read_word<R: BufRead>(input: &mut R, out: &mut DynArr<u8>) -> io::Result<usize> {
	let mut appended = 0;
	loop {
		let chunk = input.fill_buf()?;
		if chunk.is_empty() {
			return Ok(appended);
		}
		let chunk_len = chunk.len();

		let mut start = 0;
		if appended == 0 {
			start = chunk.iter().position(|&c| !is_blank(c)).unwrap_or(chunk_len);
		}
		let rest = &chunk[start..];
		// same set of delimiters as is_blank()
		let end = match (memchr3(b' ', b'\t', b'\n', rest), memchr2(b'\r', b'\x0c', rest)) {
			(Some(a), Some(b)) => Some(cmp::min(a, b)),
			(a, b) => a.or(b),
		};

		let word = &rest[ .. end.unwrap_or(rest.len()) ];
		for &c in word {
			out.append(c).map_err(oom)?;
		}
		appended += word.len();

		match end {
			Some(end) => {
				input.consume(start + end + 1);
				return Ok(appended);
			},
			None => input.consume(chunk_len),
		}
	}
}

fn oom(err: Error) -> io::Error {
	io::Error::new(io::ErrorKind::OutOfMemory, err)
}

fn show(line: &DynArr<u8>) -> Result<()> {
	let mut stdout = io::stdout();
	stdout.write_all(line.as_slice())?;
	stdout.write_all(b"\n")?;
	stdout.flush()?;
	Ok(())
}

fn main() -> Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::from_default_env())
		.with_writer(io::stderr)
		.init();
	let cli = Cli::parse();

	let mut line = DynArr::<u8>::new();
	line.append_n(b"world")?;
	line.insert_n(0, cli.greeting.as_bytes())?;
	line.append_n(b"!")?;
	show(&line)?;

	// back to the bare greeting
	line.pop_n(b"world!".len());
	line.reserve(cli.reserve)
		.with_context(|| format!("reserving {} bytes for the name", cli.reserve))?;
	info!(capacity = line.capacity(), "reserved room for the name");

	match cli.name {
		Some(name) => {
			line.append_n(name.as_bytes())?;
		},
		None => {
			print!("Enter your name: ");
			io::stdout().flush()?;
			let stdin = io::stdin();
			let read = read_word(&mut stdin.lock(), &mut line)
				.context("reading name from stdin")?;
			info!(read, "got the name");
		},
	}
	line.append_n(b"!")?;
	show(&line)?;

	line.destroy();
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn words(input: &[u8]) -> Vec<Vec<u8>> {
		let mut input = input;
		let mut out = vec![];
		loop {
			let mut word = DynArr::new();
			if read_word(&mut input, &mut word).unwrap() == 0 {
				break;
			}
			out.push(word.as_slice().to_vec());
		}
		out
	}

	#[test]
	fn read_words() {
		assert_eq!(words(b"  lorem ipsum\tdolor\nsit   amet"), vec![
			b"lorem".to_vec(),
			b"ipsum".to_vec(),
			b"dolor".to_vec(),
			b"sit".to_vec(),
			b"amet".to_vec(),
		]);
	}

	#[test]
	fn read_word_crlf() {
		assert_eq!(words(b"bob\r\nx"), vec![b"bob".to_vec(), b"x".to_vec()]);
		assert_eq!(words(b"a\x0cb\r"), vec![b"a".to_vec(), b"b".to_vec()]);
	}

	#[test]
	fn read_word_eof() {
		assert!(words(b"").is_empty());
		assert!(words(b" \n\t ").is_empty());
	}

	// one byte per chunk, so words span fill_buf() calls
	#[test]
	fn read_word_across_chunks() {
		let mut input = io::BufReader::with_capacity(1, &b"  hello world"[..]);
		let mut line = DynArr::new();
		line.append_n(b"> ").unwrap();
		assert_eq!(read_word(&mut input, &mut line).unwrap(), 5);
		assert_eq!(line.as_slice(), b"> hello");
		assert_eq!(read_word(&mut input, &mut line).unwrap(), 5);
		assert_eq!(line.as_slice(), b"> helloworld");
	}
}
