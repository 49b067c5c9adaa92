use clap::Parser;
use pdf_rows::{Document, Editor, Fragment, PageGeometry, RowsError};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Lay out a page of styled text and write it as a PDF", long_about = None)]
struct Args {
    /// Font files to embed; the first one stands in for any missing family
    #[arg(long = "font", required = true)]
    fonts: Vec<PathBuf>,

    /// Page geometry as JSON (defaults to `demos/sample-page.json`)
    #[arg(long)]
    page: Option<PathBuf>,

    /// Fragment list as JSON (defaults to `demos/sample-fragments.json`)
    #[arg(long)]
    fragments: Option<PathBuf>,

    /// Number of filler words to append after the fragments
    #[arg(long, default_value_t = 120)]
    filler: usize,

    #[arg(short, long, default_value = "sample-page.pdf")]
    output: PathBuf,
}

fn main() -> Result<(), RowsError> {
    env_logger::init();
    let args = Args::parse();

    let mut doc = Document::default();
    for path in &args.fonts {
        doc.load_font(std::fs::read(path)?)?;
    }

    let geometry = match &args.page {
        Some(path) => PageGeometry::from_json(&std::fs::read_to_string(path)?)?,
        None => PageGeometry::from_json(include_str!("sample-page.json"))?,
    };

    let mut fragments = match &args.fragments {
        Some(path) => Fragment::list_from_json(&std::fs::read_to_string(path)?)?,
        None => Fragment::list_from_json(include_str!("sample-fragments.json"))?,
    };
    if args.filler > 0 {
        fragments.push(Fragment::line_break());
        fragments.extend(
            lipsum::lipsum(args.filler)
                .split_inclusive(' ')
                .map(Fragment::new),
        );
    }

    let editor = Editor::new(Some(&mut doc), fragments, geometry)?;
    println!("laid out {} rows", editor.rows().len());

    let mut out = std::fs::File::create(&args.output)?;
    doc.write(&mut out)?;
    println!("wrote {}", args.output.display());
    Ok(())
}
