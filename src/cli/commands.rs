use crate::api::models::RecipeId;
use crate::api::RecipeSource;
use crate::browser::{DisplayStatus, FilterField, RecipeBrowser, Snapshot};
use crate::cli::render;
use crate::Result;

/// Filter values given on the command line
#[derive(Debug, Clone, Default)]
pub struct SearchArgs {
    pub title: Option<String>,
    pub cuisine: Option<String>,
    pub rating: Option<String>,
    pub total_time: Option<String>,
    pub calories: Option<String>,
}

/// Print a snapshot as text or pretty JSON
pub fn emit(snapshot: &Snapshot<'_>, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(snapshot)?);
    } else {
        print!("{}", render::render(snapshot));
    }
    Ok(())
}

/// List one catalog page
pub async fn list<S: RecipeSource>(
    browser: &mut RecipeBrowser<S>,
    page: u32,
    json: bool,
) -> Result<DisplayStatus> {
    let status = browser.load_page(page).await;
    emit(&browser.snapshot(), json)?;
    Ok(status)
}

/// Run a filtered search; with no filters this lists the first page
pub async fn search<S: RecipeSource>(
    browser: &mut RecipeBrowser<S>,
    args: SearchArgs,
    json: bool,
) -> Result<DisplayStatus> {
    let fields = [
        (FilterField::Title, args.title),
        (FilterField::Cuisine, args.cuisine),
        (FilterField::Rating, args.rating),
        (FilterField::TotalTime, args.total_time),
        (FilterField::Calories, args.calories),
    ];
    for (field, value) in fields {
        if let Some(value) = value {
            browser.set_filter(field, value);
        }
    }

    let status = browser.search().await;
    emit(&browser.snapshot(), json)?;
    Ok(status)
}

/// Load a page and print the detail panel for one recipe on it
pub async fn show<S: RecipeSource>(
    browser: &mut RecipeBrowser<S>,
    id: RecipeId,
    page: u32,
    expand: bool,
    json: bool,
) -> Result<DisplayStatus> {
    let status = browser.load_page(page).await;
    if status != DisplayStatus::Loaded {
        emit(&browser.snapshot(), json)?;
        return Ok(status);
    }

    browser.select(id)?;
    if expand {
        browser.toggle_expanded();
    }

    let snapshot = browser.snapshot();
    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot.selected)?);
    } else if let Some(recipe) = snapshot.selected {
        print!("{}", render::render_detail(recipe, snapshot.expanded));
    }

    Ok(status)
}
