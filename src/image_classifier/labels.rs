use std::path::Path;

/// Reads one label per line, dropping blank lines and a leading WordNet
/// synset id (`n01440764 tench, Tinca tinca` becomes `tench, Tinca tinca`).
pub fn load_labels(path: &Path) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read labels {}: {}", path.display(), e))?;

    let labels = parse_labels(&contents);

    if labels.is_empty() {
        return Err(format!("Labels file {} is empty", path.display()).into());
    }

    Ok(labels)
}

pub fn parse_labels(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| strip_synset_id(line).to_string())
        .collect()
}

fn strip_synset_id(line: &str) -> &str {
    match line.split_once(' ') {
        Some((id, rest)) if is_synset_id(id) => rest.trim_start(),
        _ => line,
    }
}

fn is_synset_id(token: &str) -> bool {
    token.len() == 9
        && token.starts_with('n')
        && token[1..].chars().all(|c| c.is_ascii_digit())
}
