//! Open `URL:` headers from a task file in the browser.
//!
//! Task files conventionally start with `Key: value` header lines; every
//! `URL` header collected before the first blank line is a launch candidate.

use std::io::Write;
use std::path::Path;

use tagmark_core::Task;

/// Collect the `URL:` header values from the head of the file.
pub fn url_headers(contents: &str) -> Vec<String> {
    let mut urls = Vec::new();
    for line in contents.lines() {
        if line.trim().is_empty() {
            break;
        }
        if let Some((key, value)) = line.split_once(':') {
            let value = value.trim();
            if key.trim() == "URL" && !value.is_empty() {
                urls.push(value.to_string());
            }
        }
    }
    urls
}

/// Launch the task's URLs. One URL opens immediately; several prompt for a
/// selection (empty input opens all).
pub fn launch(task: &Task) -> anyhow::Result<()> {
    let urls = url_headers(&task.read()?);
    if urls.is_empty() {
        println!("No URL headers found");
        return Ok(());
    }

    let chosen: Vec<usize> = if urls.len() == 1 {
        vec![0]
    } else {
        for (i, url) in urls.iter().enumerate() {
            println!("{}. {url}", i + 1);
        }
        prompt_choices(urls.len())?
    };

    for idx in chosen {
        if let Some(url) = urls.get(idx) {
            webbrowser::open(url)?;
        }
    }
    Ok(())
}

fn prompt_choices(count: usize) -> anyhow::Result<Vec<usize>> {
    loop {
        print!("Select urls [1-{count}, empty launches all, several by spaces]: ");
        std::io::stdout().flush()?;
        let mut line = String::new();
        if std::io::stdin().read_line(&mut line)? == 0 {
            return Ok(Vec::new());
        }
        let line = line.trim();
        if line.is_empty() {
            return Ok((0..count).collect());
        }
        match line
            .split_whitespace()
            .map(|word| word.parse::<usize>().map(|n| n.wrapping_sub(1)))
            .collect::<Result<Vec<usize>, _>>()
        {
            Ok(choices) => return Ok(choices),
            Err(_) => println!("Non-number found"),
        }
    }
}

/// Launch URLs for an unselected path.
pub fn launch_path(path: &Path) -> anyhow::Result<()> {
    launch(&Task::open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn collects_url_headers_before_the_first_blank_line() {
        let body = "Title: read later\nURL: https://example.com/a\nURL: https://example.com/b\n\nURL: https://example.com/ignored\n";
        assert_eq!(
            url_headers(body),
            ["https://example.com/a", "https://example.com/b"]
        );
    }

    #[test]
    fn headers_without_urls_are_empty() {
        assert_eq!(url_headers("Title: nothing here\n\nbody"), Vec::<String>::new());
        assert_eq!(url_headers("URL:\n"), Vec::<String>::new());
    }
}
