use clap::Parser;
use mini_decoda_rs::filters;
use mini_decoda_rs::template::MiniJinjaTemplates;
use mini_decoda_rs::{Filter, OutputDialect, TagNode};
use std::fs;
use std::io;

/// Demo program rendering a single tag with mini-decoda-rs.
#[derive(Parser, Debug)]
struct Args {
  /// Tag key, e.g. `b` or `url`
  tag: String,
  /// Body content of the tag
  body: String,
  /// Attributes as name=value, may be repeated
  #[arg(short, long = "attr")]
  attributes: Vec<String>,
  /// Emit XHTML instead of HTML
  #[arg(long)]
  xhtml: bool,
  /// Optional JSON file with tag overrides replacing the built-in filters
  #[arg(long)]
  config: Option<String>,
  /// Directory of `<name>.html` templates used with --config
  #[arg(long)]
  templates: Option<String>,
}

fn built_in_filter(tag: &str) -> mini_decoda_rs::error::Result<Filter> {
  for filter in [
    filters::text_filter()?,
    filters::image_filter()?,
    filters::url_filter()?,
  ] {
    if filter.supports(tag) {
      return Ok(filter);
    }
  }
  Ok(filters::default_filter())
}

fn main() -> io::Result<()> {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
  let args = Args::parse();

  let filter = match &args.config {
    Some(f) => {
      let config = fs::read_to_string(f)?;
      let filter = Filter::from_json_str("Custom", &config).map_err(io::Error::other)?;
      match &args.templates {
        Some(dir) => filter.with_templates(MiniJinjaTemplates::from_dir(dir)),
        None => filter,
      }
    }
    None => built_in_filter(&args.tag).map_err(io::Error::other)?,
  };

  let mut node = TagNode::new(&args.tag, &args.body);
  for attribute in args.attributes.iter() {
    let Some((name, value)) = attribute.split_once('=') else {
      return Err(io::Error::other(format!("Attribute must be name=value: {}", attribute)));
    };
    node = node.with_attribute(name, value);
  }

  let output = filter
    .render(&node, OutputDialect::from_xhtml(args.xhtml))
    .map_err(io::Error::other)?;
  println!("{output}");
  Ok(())
}
