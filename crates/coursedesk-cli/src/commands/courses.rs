//! Course catalog command implementations.

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use colored::Colorize;
use futures_util::StreamExt;

use coursedesk_core::{PageStream, Surface};
use coursedesk_core::catalog::{
    CourseId, CourseSearchFilters, DEFAULT_PAGE_SIZE, FilterUpdate, PricePreset, SearchState,
    page_window,
};

use crate::output;
use crate::session::{CliContext, CliSession};

#[derive(Args, Debug)]
pub struct CoursesCommand {
    #[command(subcommand)]
    pub command: CoursesSubcommand,
}

impl CoursesCommand {
    pub fn surface(&self) -> Surface {
        match self.command {
            CoursesSubcommand::Search(_) => Surface::CourseSearch,
            _ => Surface::Courses,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum CoursesSubcommand {
    /// List every course
    List(ListArgs),

    /// Show a single course
    Get(GetArgs),

    /// Search courses with filters and pagination
    Search(SearchArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output one JSON object per course
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Course id
    pub id: i64,

    /// Pretty-print JSON output
    #[arg(long)]
    pub json: bool,
}

/// Price presets offered by the search page.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PriceArg {
    Any,
    Free,
    Under100,
    #[value(name = "100-300")]
    From100To300,
    Over300,
}

impl From<PriceArg> for PricePreset {
    fn from(arg: PriceArg) -> Self {
        match arg {
            PriceArg::Any => PricePreset::Any,
            PriceArg::Free => PricePreset::Free,
            PriceArg::Under100 => PricePreset::Under100,
            PriceArg::From100To300 => PricePreset::From100To300,
            PriceArg::Over300 => PricePreset::Over300,
        }
    }
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Free-text search
    pub query: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub level: Option<String>,

    #[arg(long)]
    pub min_price: Option<f64>,

    #[arg(long)]
    pub max_price: Option<f64>,

    /// Price preset; overrides --min-price and --max-price
    #[arg(long, value_enum)]
    pub price: Option<PriceArg>,

    /// Page to show
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: u32,

    /// Fetch every page instead of one
    #[arg(long, conflicts_with = "page")]
    pub all: bool,

    /// Output one JSON object per course
    #[arg(long)]
    pub json: bool,
}

pub async fn handle(cmd: CoursesCommand, ctx: &CliContext) -> Result<()> {
    let session = CliSession::open(ctx)?;

    match cmd.command {
        CoursesSubcommand::List(args) => {
            let courses = session
                .manager
                .courses()
                .await
                .context("Failed to list courses")?;

            if courses.is_empty() {
                eprintln!("{}", "No courses found.".dimmed());
            }
            for course in &courses {
                if args.json {
                    output::json(course)?;
                } else {
                    output::course_line(course);
                }
            }
        }
        CoursesSubcommand::Get(args) => {
            let course = session
                .manager
                .course(CourseId(args.id))
                .await
                .context("Failed to fetch course")?;

            if args.json {
                output::json_pretty(&course)?;
            } else {
                output::field("Title", &course.title);
                output::field("Category", &course.category);
                output::field("Level", &course.level);
                output::field("Price", &output::price(course.price));
                if !course.description.is_empty() {
                    println!();
                    println!("{}", course.description);
                }
            }
        }
        CoursesSubcommand::Search(args) => search(&session, args).await?,
    }

    session.save()
}

async fn search(session: &CliSession, args: SearchArgs) -> Result<()> {
    let mut state = SearchState::new(CourseSearchFilters::default());
    state.update_filters(FilterUpdate {
        search: Some(args.query),
        category: Some(args.category),
        level: Some(args.level),
        min_price: Some(args.min_price),
        max_price: Some(args.max_price),
        page_size: Some(args.page_size),
    });
    if let Some(price) = args.price {
        state.apply_price_preset(price.into());
    }

    if args.all {
        let pages = session
            .manager
            .search_pages(state.filters().clone(), args.page_size);
        return print_all_pages(pages, args.json).await;
    }

    let mut result = session
        .manager
        .search_courses(state.filters(), state.page_request())
        .await
        .context("Failed to search courses")?;
    state.apply(&result);

    if args.page != state.current_page() {
        state.change_page(args.page)?;
        result = session
            .manager
            .search_courses(state.filters(), state.page_request())
            .await
            .context("Failed to search courses")?;
        state.apply(&result);
    }

    if result.courses.is_empty() {
        eprintln!("{}", "No courses matched.".dimmed());
        return Ok(());
    }

    for course in &result.courses {
        if args.json {
            output::json(course)?;
        } else {
            output::course_line(course);
        }
    }

    if !args.json {
        eprintln!();
        eprintln!(
            "{}  {}",
            output::page_window(&page_window(state.current_page(), state.total_pages())),
            format!("({} courses)", state.total_count()).dimmed()
        );
    }

    Ok(())
}

async fn print_all_pages(mut pages: impl PageStream + Unpin, json: bool) -> Result<()> {
    let mut found = 0;
    while let Some(page) = pages.next().await {
        let page = page.context("Failed to search courses")?;
        found += page.courses.len();
        for course in &page.courses {
            if json {
                output::json(course)?;
            } else {
                output::course_line(course);
            }
        }
    }

    if found == 0 {
        eprintln!("{}", "No courses matched.".dimmed());
    }
    Ok(())
}
