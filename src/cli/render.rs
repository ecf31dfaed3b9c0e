use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::core::AppConfig;
use crate::framework::Framework;
use crate::marker::{StyleResult, parse_style_results};
use crate::render::{StyleMatrix, axis_bar};

const AXIS_BAR_WIDTH: usize = 21;

/// Terminal rendering of a result: header, one bar per axis, summary.
pub fn describe(result: &StyleResult) -> String {
    let label = match result.framework.parse::<Framework>() {
        Ok(fw) => fw.display_label().to_string(),
        Err(_) => result.framework.clone(),
    };
    let mut lines = vec![
        format!("== {}: {} ==", label, result.style),
        format!(
            "{:>12}  {}",
            result.dim1_label,
            axis_bar(&result.dim1_left, &result.dim1_right, result.dim1_score, AXIS_BAR_WIDTH)
        ),
        format!(
            "{:>12}  {}",
            result.dim2_label,
            axis_bar(&result.dim2_left, &result.dim2_right, result.dim2_score, AXIS_BAR_WIDTH)
        ),
    ];
    if !result.summary.is_empty() {
        lines.push(result.summary.clone());
    }
    lines.join("\n")
}

/// Render `result` and write it as `<out_dir>/<index>-<framework>.svg`
pub async fn write_svg(
    matrix: &mut StyleMatrix,
    result: &StyleResult,
    out_dir: &Path,
    index: usize,
) -> Result<PathBuf> {
    let svg = matrix.render(result).await?;
    let framework = Framework::lookup_or_default(&result.framework);
    let path = out_dir.join(format!("{}-{}.svg", index, framework));
    tokio::fs::create_dir_all(out_dir).await?;
    tokio::fs::write(&path, svg)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

async fn read_reply<R: AsyncRead + Unpin>(mut reader: R) -> Result<String> {
    let mut buf = String::new();
    reader
        .read_to_string(&mut buf)
        .await
        .context("Failed to read reply")?;
    Ok(buf)
}

pub async fn run(input: &Path, out_dir: &Path) -> Result<()> {
    let text = if input == Path::new("-") {
        read_reply(tokio::io::stdin()).await?
    } else {
        tokio::fs::read_to_string(input)
            .await
            .with_context(|| format!("Failed to read {}", input.display()))?
    };

    let parsed = parse_style_results(&text);
    if parsed.results.is_empty() {
        println!("No style markers found");
        return Ok(());
    }

    let config = AppConfig::default();
    let mut matrix = StyleMatrix::new(&config.static_dir);
    for (i, result) in parsed.results.iter().enumerate() {
        let path = write_svg(&mut matrix, result, out_dir, i + 1).await?;
        println!("{}\n-> {}\n", describe(result), path.display());
    }

    Ok(())
}
