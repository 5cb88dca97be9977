use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context as _, Result};
use chrono::{Datelike, NaiveDate};

use rust_taskgrid::engine::{Engine, TaskIntent};
use rust_taskgrid::grid::{Segment, DAYS_PER_WEEK};
use rust_taskgrid::models::filter::{TaskFilter, TimeWindow};
use rust_taskgrid::models::settings::Settings;
use rust_taskgrid::models::task::{TaskCategory, TaskDraft, TaskId};
use rust_taskgrid::services::notification::DesktopNotificationSink;
use rust_taskgrid::services::settings::{resolve_database_path, SettingsService};
use rust_taskgrid::services::task::json::{export_tasks, import_tasks};
use rust_taskgrid::services::task::{SqliteTaskStore, TaskStore};
use rust_taskgrid::utils::date::add_days;

/// Characters per day column in the text grid.
const CELL_CHARS: usize = 6;

/// Resolved settings and database location for one invocation.
pub struct Context {
    pub settings: Settings,
    pub database_path: PathBuf,
    notify: bool,
}

impl Context {
    pub fn load(config: Option<PathBuf>, db: Option<PathBuf>, notify: bool) -> Result<Self> {
        let service = match config {
            Some(path) => SettingsService::new(path),
            None => SettingsService::from_project_dirs()?,
        };
        let settings = service.get()?;
        let database_path = match db {
            Some(path) => path,
            None => resolve_database_path(&settings)?,
        };
        if let Some(parent) = database_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create dir {}", parent.display()))?;
        }
        Ok(Self {
            settings,
            database_path,
            notify,
        })
    }

    fn open_store(&self) -> Result<SqliteTaskStore> {
        let path = self
            .database_path
            .to_str()
            .ok_or_else(|| anyhow!("Database path is not valid UTF-8: {}", self.database_path.display()))?;
        SqliteTaskStore::open(path)
    }

    fn engine(&self) -> Result<Engine> {
        let mut builder = Engine::builder(self.open_store()?).settings(self.settings.clone());
        if self.notify {
            builder = builder.notifications(DesktopNotificationSink::default());
        }
        builder.build().context("Invalid settings")
    }
}

pub fn show(
    context: &Context,
    month: Option<String>,
    categories: Vec<String>,
    weeks: Option<u32>,
    search: Option<String>,
) -> Result<()> {
    let mut engine = context.engine()?;
    if let Some(month) = month {
        engine.set_month(parse_month(&month)?);
    }
    engine.set_filter(build_filter(&categories, weeks, search)?);
    print!("{}", render_month(&engine));
    Ok(())
}

pub fn list(context: &Context) -> Result<()> {
    let tasks = context.open_store()?.list_tasks()?;
    if tasks.is_empty() {
        println!("No tasks");
        return Ok(());
    }
    for task in tasks {
        println!(
            "{}  {} .. {}  {:<11}  {}",
            task.id, task.start_date, task.end_date, task.category, task.name
        );
    }
    Ok(())
}

pub fn add(
    context: &Context,
    name: String,
    start: NaiveDate,
    end: Option<NaiveDate>,
    category: String,
) -> Result<()> {
    let category: TaskCategory = category.parse()?;
    let draft = TaskDraft::new(name, category, start, end.unwrap_or(start));
    let mut engine = context.engine()?;
    if let Some(task) = engine.dispatch(TaskIntent::Create(draft))? {
        println!("Created {} ({})", task.id, task.name);
    }
    Ok(())
}

pub fn move_task(context: &Context, id: String, days: i64) -> Result<()> {
    let mut engine = context.engine()?;
    let id = TaskId::new(id);
    let Some(task) = engine.task(&id) else {
        bail!("No task with id {}", id);
    };
    let moved = task.with_dates(add_days(task.start_date, days), add_days(task.end_date, days));
    engine.dispatch(TaskIntent::Update(moved.clone()))?;
    println!("Moved {} to {} .. {}", moved.id, moved.start_date, moved.end_date);
    Ok(())
}

pub fn remove(context: &Context, id: String) -> Result<()> {
    let mut engine = context.engine()?;
    let id = TaskId::new(id);
    if engine.task(&id).is_none() {
        bail!("No task with id {}", id);
    }
    engine.dispatch(TaskIntent::Delete(id.clone()))?;
    println!("Removed {}", id);
    Ok(())
}

pub fn export(context: &Context, path: &Path) -> Result<()> {
    let tasks = context.open_store()?.list_tasks()?;
    export_tasks(path, &tasks)?;
    println!("Exported {} tasks to {}", tasks.len(), path.display());
    Ok(())
}

pub fn import(context: &Context, path: &Path) -> Result<()> {
    let tasks = import_tasks(path)?;
    let store = context.open_store()?;
    let service = store.service();
    for task in &tasks {
        service.save(task)?;
    }
    println!("Imported {} tasks from {}", tasks.len(), path.display());
    Ok(())
}

fn parse_month(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", value), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", value))
}

fn build_filter(categories: &[String], weeks: Option<u32>, search: Option<String>) -> Result<TaskFilter> {
    let mut filter = TaskFilter::new();
    for category in categories {
        filter = filter.with_category(category.parse()?);
    }
    if let Some(weeks) = weeks {
        filter = filter.with_window(TimeWindow::weeks(weeks));
    }
    if let Some(search) = search {
        filter = filter.with_search(search);
    }
    Ok(filter)
}

/// Text rendering of the visible month: a day-number line per week followed
/// by one line per lane, plus "+N" markers where the lane cap hid segments.
fn render_month(engine: &Engine) -> String {
    let grid = engine.grid();
    let layout = engine.visible_layout();
    let mut out = format!("{}\n", grid.month().format("%B %Y"));

    if let Some(first_row) = grid.week_rows().next() {
        let header: String = first_row
            .iter()
            .map(|cell| format!("{:<width$}", cell.date.format("%a").to_string(), width = CELL_CHARS))
            .collect();
        out.push_str(header.trim_end());
        out.push('\n');
    }

    for (row, cells) in grid.week_rows().enumerate() {
        let days: String = cells
            .iter()
            .map(|cell| {
                let marker = if cell.is_today {
                    '*'
                } else if cell.is_current_month {
                    ' '
                } else {
                    '.'
                };
                format!("{:>2}{:<width$}", cell.date.day(), marker, width = CELL_CHARS - 2)
            })
            .collect();
        out.push_str(days.trim_end());
        out.push('\n');

        let row_segments: Vec<&Segment> = layout.visible.iter().filter(|s| s.row == row).collect();
        let lanes = row_segments.iter().map(|s| s.lane + 1).max().unwrap_or(0);
        for lane in 0..lanes {
            let mut line = vec![' '; DAYS_PER_WEEK * CELL_CHARS];
            for segment in row_segments.iter().filter(|s| s.lane == lane) {
                let name = engine
                    .task(&segment.task_id)
                    .map_or("?", |task| task.name.as_str());
                draw_bar(&mut line, segment, name);
            }
            let line: String = line.into_iter().collect();
            out.push_str(line.trim_end());
            out.push('\n');
        }

        if cells.iter().any(|cell| layout.hidden_on(cell.date) > 0) {
            let hidden: String = cells
                .iter()
                .map(|cell| match layout.hidden_on(cell.date) {
                    0 => " ".repeat(CELL_CHARS),
                    n => format!("{:<width$}", format!("+{}", n), width = CELL_CHARS),
                })
                .collect();
            out.push_str(hidden.trim_end());
            out.push('\n');
        }
    }
    out
}

fn draw_bar(line: &mut [char], segment: &Segment, name: &str) {
    let start = segment.column * CELL_CHARS;
    // leave one blank column before the next day
    let end = start + segment.width * CELL_CHARS - 1;
    line[start] = if segment.shows_start() { '[' } else { '<' };
    line[end - 1] = if segment.shows_end() { ']' } else { '>' };
    // continuation slices carry no label
    let label = if segment.shows_start() { name } else { "" };
    let fill = label.chars().chain(std::iter::repeat('-'));
    for (slot, ch) in line[start + 1..end - 1].iter_mut().zip(fill) {
        *slot = ch;
    }
}
