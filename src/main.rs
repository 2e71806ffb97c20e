use iced::widget::{
    button, checkbox, column, container, row, scrollable, text, text_input, Column, Row,
};
use iced::{Alignment, Element, Length, Task, Theme};
use std::collections::{HashMap, HashSet};

mod api;
mod state;
mod ui;

use state::data::Record;
use state::durable::DurableStore;
use state::store::{CellEdit, SnapshotStore};
use ui::table::{self, Column as TableColumn, SortRule, TableRow};

/// Main application state
struct PriceTable {
    /// The per-session dataset with its reset snapshot and save file
    store: SnapshotStore,
    /// True until the initial fetch settles
    loading: bool,
    /// Whether rows are grouped by category
    grouping: bool,
    /// Active sort rules, primary first
    sort: Vec<SortRule>,
    /// Categories whose groups are expanded
    expanded: HashSet<String>,
    /// In-progress price inputs, keyed by dataset position
    pending_edits: HashMap<usize, String>,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// The remote fetch settled (an empty Vec means it failed)
    DataLoaded(Vec<Record>),
    /// User clicked a column header to change the sort
    HeaderClicked(TableColumn),
    /// User toggled the group-by-category checkbox
    GroupingToggled(bool),
    /// User expanded or collapsed one category group
    GroupToggled(String),
    /// User is typing in a price cell
    PriceInput(usize, String),
    /// A price cell was committed (submit/defocus)
    PriceCommitted(usize),
    /// User clicked the Save button
    SaveRequested,
    /// User clicked the Reset button
    ResetRequested,
}

impl PriceTable {
    /// Create a new instance of the application and kick off the fetch
    fn new() -> (Self, Task<Message>) {
        let app = PriceTable {
            store: SnapshotStore::new(DurableStore::new()),
            loading: true,
            grouping: true,
            sort: table::default_sort(),
            expanded: HashSet::new(),
            pending_edits: HashMap::new(),
            status: String::from("Loading product data..."),
        };

        (
            app,
            Task::perform(api::table::fetch_table_data(), Message::DataLoaded),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::DataLoaded(rows) => {
                self.store.complete_load(rows);
                // A save from an earlier session wins over the fresh fetch
                self.store.hydrate_from_durable();
                self.loading = false;

                self.status = if self.store.rows().is_empty() {
                    String::from("Could not load product data.")
                } else {
                    format!("Ready. {} products.", self.store.rows().len())
                };
            }
            Message::HeaderClicked(column) => {
                if column.sortable() {
                    self.sort = table::cycle_sort(&self.sort, column);
                }
            }
            Message::GroupingToggled(grouping) => {
                self.grouping = grouping;
            }
            Message::GroupToggled(category) => {
                if !self.expanded.remove(&category) {
                    self.expanded.insert(category);
                }
            }
            Message::PriceInput(index, value) => {
                self.pending_edits.insert(index, value);
            }
            Message::PriceCommitted(index) => {
                // Non-numeric entry is rejected here, at the capture boundary
                if let Some(entry) = self.pending_edits.remove(&index) {
                    if let Ok(value) = entry.trim().parse::<f64>() {
                        self.store.set_cell(index, CellEdit::Price(value));
                    }
                }
            }
            Message::SaveRequested => match self.store.save() {
                Ok(()) => self.status = String::from("Saved."),
                Err(e) => {
                    log::error!("error saving data to local storage: {e}");
                    self.status = String::from("Save failed; edits are kept in memory.");
                }
            },
            Message::ResetRequested => {
                self.pending_edits.clear();
                match self.store.reset() {
                    Ok(()) => self.status = String::from("Reset to loaded data."),
                    Err(e) => {
                        log::error!("error removing data from local storage: {e}");
                        self.status = String::from("Reset done, but the save file remains.");
                    }
                }
            }
        }

        Task::none()
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        if self.loading {
            return container(text("Loading...").size(24))
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x(Length::Fill)
                .center_y(Length::Fill)
                .into();
        }

        let rows = self.store.rows();
        let order = table::sorted_indices(rows, &self.sort);

        let mut body: Column<Message> = column![].spacing(2);
        if self.grouping {
            for line in table::grouped(rows, &order, &self.expanded) {
                body = body.push(match line {
                    TableRow::GroupHeader {
                        category,
                        count,
                        expanded,
                    } => self.group_header(category, count, expanded),
                    TableRow::Item { index } => self.product_row(index),
                });
            }
        } else {
            for index in order {
                body = body.push(self.product_row(index));
            }
        }

        let content = column![
            self.header_row(),
            scrollable(body).height(Length::Fill),
            self.action_row(),
        ]
        .spacing(8)
        .padding(12);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Column headers with sort indicators and the grouping checkbox
    fn header_row(&self) -> Element<Message> {
        let mut headers: Row<Message> = row![].spacing(8);

        for column in TableColumn::ALL {
            let indicator = match self.sort.first() {
                Some(rule) if rule.column == column => {
                    if rule.descending {
                        " v"
                    } else {
                        " ^"
                    }
                }
                _ => "",
            };

            let label = button(text(format!("{}{indicator}", column.title())).size(14))
                .on_press_maybe(column.sortable().then_some(Message::HeaderClicked(column)))
                .padding(6);

            let header: Element<Message> = if column.groupable() {
                row![
                    checkbox("", self.grouping).on_toggle(Message::GroupingToggled),
                    label
                ]
                .align_y(Alignment::Center)
                .into()
            } else {
                label.into()
            };

            headers = headers.push(
                container(header).width(Length::FillPortion(column.width_portion())),
            );
        }

        headers.into()
    }

    /// Collapsible header line for one category group
    fn group_header(&self, category: String, count: usize, expanded: bool) -> Element<Message> {
        let arrow = if expanded { "v" } else { ">" };
        button(text(format!("{arrow} {category} ({count})")).size(14))
            .on_press(Message::GroupToggled(category))
            .padding(6)
            .width(Length::Fill)
            .into()
    }

    /// One product row; `index` is the row's dataset position, which the
    /// price cell needs to commit its edit to the right record
    fn product_row(&self, index: usize) -> Element<Message> {
        let record = &self.store.rows()[index];

        let price_value = self
            .pending_edits
            .get(&index)
            .cloned()
            .unwrap_or_else(|| record.price.to_string());

        let price_cell = text_input("0.00", &price_value)
            .on_input(move |value| Message::PriceInput(index, value))
            .on_submit(Message::PriceCommitted(index))
            .size(14)
            .padding(4);

        let cells: Row<Message> = row![
            cell(text(record.id.to_string()).size(14), TableColumn::Id),
            cell(text(&record.name).size(14), TableColumn::Name),
            cell(
                text(image_file_name(&record.image)).size(14),
                TableColumn::Image
            ),
            cell(text(&record.category).size(14), TableColumn::Category),
            cell(text(record.display_label()).size(14), TableColumn::Label),
            cell(price_cell, TableColumn::Price),
            cell(text(&record.description).size(14), TableColumn::Description),
        ]
        .spacing(8)
        .align_y(Alignment::Center);

        cells.into()
    }

    /// Reset/Save buttons plus the status line
    fn action_row(&self) -> Element<Message> {
        row![
            text(&self.status).size(14).width(Length::Fill),
            button("Reset").on_press(Message::ResetRequested).padding(8),
            button("Save").on_press(Message::SaveRequested).padding(8),
        ]
        .spacing(12)
        .align_y(Alignment::Center)
        .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Wrap widget content in a width-portioned table cell
fn cell<'a>(
    content: impl Into<Element<'a, Message>>,
    column: TableColumn,
) -> Element<'a, Message> {
    container(content)
        .width(Length::FillPortion(column.width_portion()))
        .into()
}

/// The table shows the file name from the image URL rather than
/// downloading the image itself
fn image_file_name(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}

fn main() -> iced::Result {
    env_logger::init();

    iced::application("Price Table", PriceTable::update, PriceTable::view)
        .theme(PriceTable::theme)
        .centered()
        .run_with(PriceTable::new)
}
