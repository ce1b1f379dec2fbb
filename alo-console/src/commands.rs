//! Command handlers

use alo_client::{
    AppContext, BoardOptions, BoardView, BookingBoard, ClientConfig, CustomerSearch,
    FetchOutcome, FloorManager, Header, NetworkHttpClient, PreferenceCache, RestaurantApi,
};
use anyhow::{Context, anyhow, bail};
use shared::models::{Booking, BookingStatus, Floor, FloorForm, StoreBranch};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::cli::{BookingFilters, FloorCommand};

type Api = Arc<RestaurantApi<NetworkHttpClient>>;

/// Everything a command needs: the service, the shared context and the header
pub struct App {
    config: ClientConfig,
    api: Api,
    context: AppContext,
    header: Header,
}

impl App {
    pub fn new(config: ClientConfig) -> anyhow::Result<Self> {
        let http = config
            .build_http_client()
            .context("failed to build HTTP client")?;
        let context = AppContext::new();
        let header = Header::new(
            context.clone(),
            PreferenceCache::new(config.preference_dir.clone()),
        );

        Ok(Self {
            api: Arc::new(RestaurantApi::new(http)),
            context,
            header,
            config,
        })
    }

    /// Branch for this call: `--branch` if given, else the remembered one
    async fn resolve_branch(&self, branch: Option<i64>) -> anyhow::Result<StoreBranch> {
        if let Some(id) = branch {
            let branches = self.context.load_store_branches(&self.api).await?;
            let branch = branches
                .into_iter()
                .find(|b| b.id == id)
                .ok_or_else(|| anyhow!("unknown branch {}", id))?;
            self.context.set_store_branch_active(branch.clone());
            return Ok(branch);
        }

        self.header
            .restore_branch()
            .ok_or_else(|| anyhow!("no branch selected; run `alo use-branch <id>` or pass --branch"))
    }

    fn board(&self, filters: &BookingFilters) -> BookingBoard<Api> {
        let mut options = BoardOptions::from_config(&self.config);
        if let Some(rows) = filters.rows {
            options.page_size = rows.max(1);
        }
        if filters.any_date {
            options.initial_date = None;
        } else if filters.date.is_some() {
            options.initial_date = filters.date;
        }

        let board = BookingBoard::new(self.api.clone(), self.context.clone(), options);
        board.set_status_filter(filters.statuses.clone());
        board.set_customer(filters.customer.clone());
        board.set_sort_field(filters.sort);
        board.set_sort_direction(filters.direction);
        board
    }

    // ========== Branches ==========

    pub async fn branches(&self) -> anyhow::Result<()> {
        let active = self.header.restore_branch();
        let branches = self.context.load_store_branches(&self.api).await?;
        if branches.is_empty() {
            println!("No branches");
            return Ok(());
        }
        for branch in branches {
            let marker = if active.as_ref().is_some_and(|a| a.id == branch.id) {
                "*"
            } else {
                " "
            };
            println!("{} {:>6}  {}", marker, branch.id, branch.name);
        }
        Ok(())
    }

    pub async fn use_branch(&self, id: i64) -> anyhow::Result<()> {
        self.context.load_store_branches(&self.api).await?;
        let branch = self.header.select_branch(id)?;
        println!("Active branch: {} ({})", branch.name, branch.id);
        Ok(())
    }

    // ========== Bookings ==========

    pub async fn bookings(&self, branch: Option<i64>, filters: BookingFilters) -> anyhow::Result<()> {
        self.resolve_branch(branch).await?;
        let board = self.board(&filters);

        match board.refresh().await {
            FetchOutcome::Failed => bail!("failed to fetch bookings"),
            _ => print_board(&board.view()),
        }
        Ok(())
    }

    pub async fn watch(&self, branch: Option<i64>, filters: BookingFilters) -> anyhow::Result<()> {
        let active = self.resolve_branch(branch).await?;
        let board = self.board(&filters);
        let mut view_rx = board.subscribe();
        let shutdown = CancellationToken::new();
        let poller = tokio::spawn(board.clone().run(shutdown.clone()));

        println!(
            "Watching bookings of {} every {}s (Ctrl-C to stop)",
            active.name,
            self.config.poll_interval.as_secs()
        );

        let mut shown: Option<Vec<Booking>> = None;
        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => break,
                changed = view_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let view = view_rx.borrow_and_update().clone();
                    if shown.as_ref() != Some(&view.bookings) {
                        println!("--- {}", chrono::Local::now().format("%H:%M:%S"));
                        print_board(&view);
                        shown = Some(view.bookings);
                    }
                }
            }
        }

        shutdown.cancel();
        poller.await.context("booking poller panicked")?;
        Ok(())
    }

    pub async fn booking(&self, id: String) -> anyhow::Result<()> {
        let board = BookingBoard::new(
            self.api.clone(),
            self.context.clone(),
            BoardOptions::from_config(&self.config),
        );
        match board.select_booking(id.as_str()).await {
            FetchOutcome::Failed => bail!("failed to fetch booking {}", id),
            _ => match board.view().detail {
                Some(detail) => println!("{}", serde_json::to_string_pretty(&detail)?),
                None => println!("Booking {} not found", id),
            },
        }
        Ok(())
    }

    pub async fn set_status(&self, id: String, status: BookingStatus) -> anyhow::Result<()> {
        // The list refetch after the update needs a branch; the detail does not
        self.header.restore_branch();
        let board = BookingBoard::new(
            self.api.clone(),
            self.context.clone(),
            BoardOptions::from_config(&self.config),
        );
        board.select_booking(id.as_str()).await;
        board.update_status(&id, status).await?;

        let current = board
            .view()
            .detail
            .map(|b| b.status_text().to_string())
            .unwrap_or_else(|| "unknown".to_string());
        println!("Booking {} is now {}", id, current);
        Ok(())
    }

    // ========== Customers ==========

    pub async fn customers(&self, text: String) -> anyhow::Result<()> {
        let search = CustomerSearch::new(self.api.clone(), self.config.search_debounce);
        let options = search.search(&text).await?;
        if options.is_empty() {
            println!("No customers match \"{}\"", text);
        }
        for option in options {
            println!("{:<38}  {}", option.value, option.label);
        }
        Ok(())
    }

    // ========== Floors ==========

    pub async fn floors(&self, branch: Option<i64>, command: FloorCommand) -> anyhow::Result<()> {
        self.resolve_branch(branch).await?;
        let floors = FloorManager::new(self.api.clone(), self.context.clone());
        let mut notifications = floors.notifications();

        match command {
            FloorCommand::List => {
                floors.refresh().await?;
            }
            FloorCommand::Create {
                name,
                number,
                capacity,
            } => {
                let form = FloorForm {
                    name,
                    floor_number: number,
                    capacity,
                };
                floors.create(form).await?;
            }
            FloorCommand::Update {
                id,
                name,
                number,
                capacity,
            } => {
                floors.refresh().await?;
                let current = floors
                    .floors()
                    .into_iter()
                    .find(|f| f.id == id)
                    .ok_or_else(|| anyhow!("floor {} not found in the active branch", id))?;
                let mut form = floors.begin_edit(&current);
                if let Some(name) = name {
                    form.name = name;
                }
                if let Some(number) = number {
                    form.floor_number = number;
                }
                if let Some(capacity) = capacity {
                    form.capacity = capacity;
                }
                floors.submit_edit(form).await?;
            }
            FloorCommand::Delete { id } => floors.delete(id).await?,
        }

        while let Ok(notification) = notifications.try_recv() {
            println!("{}", notification.message);
        }
        print_floors(&floors.floors());
        Ok(())
    }
}

// ========== Output ==========

fn print_board(view: &BoardView) {
    if view.bookings.is_empty() {
        println!("No bookings");
        return;
    }
    println!(
        "{:<38} {:<10} {:<20} {:>6}  {}",
        "ID", "STATUS", "BOOKING DATE", "PEOPLE", "CUSTOMER"
    );
    for booking in &view.bookings {
        println!("{}", booking_row(booking));
    }
    println!(
        "{} bookings (page {}, up to {} rows)",
        view.bookings.len(),
        view.pages.page_index(),
        view.total_rows()
    );
}

fn booking_row(booking: &Booking) -> String {
    format!(
        "{:<38} {:<10} {:<20} {:>6}  {}",
        booking.id,
        booking.status_text(),
        booking.booking_date.as_deref().unwrap_or("-"),
        booking
            .number_of_people
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".to_string()),
        booking.customer_name.as_deref().unwrap_or("-"),
    )
}

fn print_floors(floors: &[Floor]) {
    if floors.is_empty() {
        println!("No floors");
        return;
    }
    println!("{:>6}  {:<24} {:>6} {:>9}", "ID", "NAME", "FLOOR", "CAPACITY");
    for floor in floors {
        println!(
            "{:>6}  {:<24} {:>6} {:>9}",
            floor.id, floor.name, floor.floor_number, floor.capacity
        );
    }
}
