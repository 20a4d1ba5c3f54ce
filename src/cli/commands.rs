use std::collections::HashMap;
use std::path::Path;

use crate::app::{AppContext, FreshetError, Result};
use crate::domain::FeedResponse;
use crate::feed::DEFAULT_ITEM_LOCATION;
use crate::list::Axis;

pub async fn fetch(
    ctx: &AppContext,
    source: &str,
    params: &[String],
    item_location: Option<&str>,
    raw: bool,
    json: bool,
) -> Result<()> {
    let params = parse_params(params)?;

    let mut feed = ctx.feed(source)?;
    if let Some(location) = item_location {
        feed = feed.with_item_location(location.to_string());
    }
    if raw {
        feed = feed.with_convert_items(false);
    }

    let response = feed.load(&params).await?;
    print_response(&response, json)
}

#[allow(clippy::too_many_arguments)]
pub async fn render(
    ctx: &AppContext,
    source: &str,
    params: &[String],
    item_location: Option<&str>,
    template: Option<&Path>,
    chasing: Option<&str>,
    start: Option<usize>,
    count: Option<usize>,
    output: Option<&Path>,
) -> Result<()> {
    let params = parse_params(params)?;
    let axis = parse_axis(chasing)?;
    if axis.is_some() && template.is_none() {
        return Err(FreshetError::Other(
            "--chasing requires --template".to_string(),
        ));
    }

    let mut feed = ctx.feed(source)?;
    if let Some(location) = item_location {
        feed = feed.with_item_location(location.to_string());
    }
    if let Some(path) = template {
        feed = feed.with_view(ctx.view_from_template(path, axis)?);
    } else if feed.view().is_none() {
        return Err(FreshetError::Config(format!(
            "no template configured for {source}; pass --template"
        )));
    }

    let response = feed.load(&params).await?;
    if let Some(error) = &response.error {
        eprintln!("Feed error: {}", error);
        return Ok(());
    }

    let html = if start.is_none() && count.is_none() {
        response.html
    } else {
        let items = response.items.as_deref().unwrap_or(&[]);
        feed.view()
            .map(|view| view.render(items, start, count))
            .unwrap_or_default()
    };

    match output {
        Some(path) => {
            std::fs::write(path, &html)?;
            println!("Wrote {} bytes to {}", html.len(), path.display());
        }
        None => println!("{}", html),
    }

    Ok(())
}

pub fn list_feeds(ctx: &AppContext) -> Result<()> {
    if ctx.config.feeds.is_empty() {
        println!("No feeds configured");
        return Ok(());
    }

    for feed in &ctx.config.feeds {
        println!("{}\n  {}", feed.name, feed.url);
        if feed.item_location != DEFAULT_ITEM_LOCATION {
            println!("  item location: {}", feed.item_location);
        }
        if !feed.convert_items {
            println!("  raw items");
        }
    }

    Ok(())
}

fn print_response(response: &FeedResponse, json: bool) -> Result<()> {
    if let Some(error) = &response.error {
        eprintln!("Feed error: {}", error);
        return Ok(());
    }

    if json {
        if let Some(items) = &response.items {
            println!("{}", serde_json::to_string_pretty(items)?);
        } else if let Some(raw) = &response.items_raw {
            let values: Vec<_> = raw.iter().map(|element| element.to_value()).collect();
            println!("{}", serde_json::to_string_pretty(&values)?);
        }
        return Ok(());
    }

    if let Some(items) = &response.items {
        if items.is_empty() {
            println!("No items");
            return Ok(());
        }
        for item in items {
            println!("{:>3}  {}", item.index, item.title());
            if !item.link().is_empty() {
                println!("     {}", item.link());
            }
            if !item.image.is_empty() {
                println!("     image: {}", item.image);
            }
        }
        match response.elapsed_ms {
            Some(elapsed) => println!("\n{} items in {} ms", items.len(), elapsed),
            None => println!("\n{} items", items.len()),
        }
    } else if let Some(raw) = &response.items_raw {
        if raw.is_empty() {
            println!("No matching elements");
            return Ok(());
        }
        for (index, element) in raw.iter().enumerate() {
            println!(
                "{:>3}  <{}> ({} children)",
                index,
                element.name,
                element.children.len()
            );
        }
    }

    Ok(())
}

fn parse_params(params: &[String]) -> Result<HashMap<String, String>> {
    let mut map = HashMap::new();
    for param in params {
        let (key, value) = param.split_once('=').ok_or_else(|| {
            FreshetError::Other(format!("invalid parameter '{param}': expected key=value"))
        })?;
        map.insert(key.to_string(), value.to_string());
    }
    Ok(map)
}

fn parse_axis(chasing: Option<&str>) -> Result<Option<Axis>> {
    match chasing {
        None => Ok(None),
        Some("vertical") => Ok(Some(Axis::Vertical)),
        Some("horizontal") => Ok(Some(Axis::Horizontal)),
        Some(other) => Err(FreshetError::Other(format!(
            "unknown chasing axis: {other}"
        ))),
    }
}
