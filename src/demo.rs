//! Scripted order-entry session driving two pickers on a headless surface.
//!
//! The form owns the selected values: pickers report changes as messages and
//! the form writes them back, the same loop a real host runs per frame.

use std::time::Duration;

use pharmpick_ui::prelude::*;
use pharmpick_ui::{ApproxMeasurer, Timings};
use web_time::Instant;

use crate::config::AppConfig;
use crate::error::AppError;

/// Messages the pickers send to the form.
#[derive(Debug, Clone, PartialEq)]
pub enum FormMessage {
    SupplierChanged(SelectionValue),
    SupplierAdded(String),
    SupplierBlurred,
    CategoriesChanged(SelectionValue),
    OpenChanged { field: &'static str, open: bool },
}

/// Time source advanced by hand.
#[derive(Debug, Clone, Copy)]
struct ManualClock {
    start: Instant,
    elapsed: Duration,
}

impl ManualClock {
    fn new() -> Self {
        Self {
            start: Instant::now(),
            elapsed: Duration::ZERO,
        }
    }

    fn now(&self) -> Instant {
        self.start + self.elapsed
    }

    fn advance(&mut self, by: Duration) -> Instant {
        self.elapsed += by;
        self.now()
    }
}

fn seed_suppliers() -> Vec<DropdownOption> {
    vec![
        DropdownOption::new("sup-1", "Apex Pharma").with_code("APX"),
        DropdownOption::new("sup-2", "Baltic Medical Supply").with_code("BMS"),
        DropdownOption::new("sup-3", "Pharmacia Wholesale").with_code("PHW"),
        DropdownOption::new("sup-4", "Vitalis Distribution"),
        DropdownOption::new("sup-5", "Medline Partners")
            .with_description("Cold-chain deliveries only"),
    ]
}

fn seed_categories() -> Vec<DropdownOption> {
    vec![
        DropdownOption::new("cat-analgesics", "Analgesics"),
        DropdownOption::new("cat-antibiotics", "Antibiotics"),
        DropdownOption::new("cat-cardiology", "Cardiology"),
        DropdownOption::new("cat-dermatology", "Dermatology"),
        DropdownOption::new("cat-respiratory", "Respiratory"),
    ]
}

/// Two pickers sharing one registry: a required, searchable supplier picker
/// that can add entries, and a checkbox category picker near the bottom of
/// the viewport that filters by type-ahead.
pub struct PharmacyForm {
    clock: ManualClock,
    timings: Timings,
    supplier: Dropdown<FormMessage>,
    categories: Dropdown<FormMessage>,
    /// Shared handle on the category picker's layout and focus state
    categories_surface: HeadlessSurface,
    suppliers: Vec<DropdownOption>,
    transcript: Vec<String>,
}

impl PharmacyForm {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let registry = DropdownRegistry::new();
        let [width, height] = config.preferences.viewport;
        let viewport = Size::new(width, height);
        let suppliers = seed_suppliers();

        let supplier_config = config
            .dropdown
            .to_dropdown_config()
            .placeholder("Select supplier")
            .required(true)
            .required_message("Choose a supplier");
        let supplier = Dropdown::new(registry.clone(), supplier_config)?
            .surface(HeadlessSurface::laid_out(
                viewport,
                Bounds::new(40.0, 120.0, 280.0, 36.0),
                240.0,
            ))
            .measurer(ApproxMeasurer::default())
            .options(OptionList::new(suppliers.clone())?)
            .on_change(FormMessage::SupplierChanged)
            .on_add_new(FormMessage::SupplierAdded)
            .on_blur(|| FormMessage::SupplierBlurred)
            .on_open_change(|open| FormMessage::OpenChanged {
                field: "supplier",
                open,
            });

        let categories_config = config
            .dropdown
            .to_dropdown_config()
            .placeholder("Categories")
            .searchable(false)
            .mode(SelectionMode::Checkbox);
        let categories_surface = HeadlessSurface::laid_out(
            viewport,
            Bounds::new(40.0, height - 80.0, 240.0, 36.0),
            200.0,
        );
        let categories = Dropdown::new(registry, categories_config)?
            .surface(categories_surface.clone())
            .measurer(ApproxMeasurer::default())
            .options(OptionList::new(seed_categories())?)
            .value(SelectionValue::multiple(Vec::<String>::new()))
            .on_change(FormMessage::CategoriesChanged)
            .on_open_change(|open| FormMessage::OpenChanged {
                field: "categories",
                open,
            });

        Ok(Self {
            clock: ManualClock::new(),
            timings: config.dropdown.timings,
            supplier,
            categories,
            categories_surface,
            suppliers,
            transcript: Vec::new(),
        })
    }

    pub fn supplier(&self) -> &Dropdown<FormMessage> {
        &self.supplier
    }

    pub fn categories(&self) -> &Dropdown<FormMessage> {
        &self.categories
    }

    pub fn suppliers(&self) -> &[DropdownOption] {
        &self.suppliers
    }

    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    pub fn into_transcript(self) -> Vec<String> {
        self.transcript
    }

    /// Play the whole session.
    pub fn run_script(&mut self) {
        self.pick_supplier_by_search();
        self.add_missing_supplier();
        self.pick_categories_by_type_ahead();
        self.switch_between_pickers();
        self.clear_required_supplier();
    }

    fn pick_supplier_by_search(&mut self) {
        self.record("-- search and pick a supplier");
        let now = self.clock.now();
        self.supplier.open(now);
        self.wait(self.timings.open_settle_ms + self.timings.focus_search_ms);
        self.snapshot_supplier();

        let now = self.clock.now();
        self.supplier.on_search_term_change("pha", now);
        self.wait(self.timings.search_debounce_ms + self.timings.frame_ms);
        self.snapshot_supplier();

        self.key_supplier(KeyCode::Down);
        self.key_supplier(KeyCode::Enter);
        self.wait(self.timings.close_animation_ms);
        self.snapshot_supplier();
    }

    fn add_missing_supplier(&mut self) {
        self.record("-- add a supplier that is not listed");
        let now = self.clock.now();
        self.supplier.open(now);
        self.wait(self.timings.open_settle_ms);

        let now = self.clock.now();
        self.supplier.on_search_term_change("Zeta Labs", now);
        self.wait(self.timings.search_debounce_ms + self.timings.frame_ms);
        self.record(format!("supplier search: {:?}", self.supplier.search_status()));

        self.key_supplier(KeyCode::Enter);
        self.wait(self.timings.close_animation_ms);
        self.snapshot_supplier();
    }

    fn pick_categories_by_type_ahead(&mut self) {
        self.record("-- filter categories by typing and tick two");
        let now = self.clock.now();
        self.categories.open(now);
        self.wait(self.timings.open_settle_ms + self.timings.focus_list_ms);
        self.snapshot_categories();

        for c in "an".chars() {
            let now = self.clock.now();
            self.categories
                .handle_key(KeyCode::Char(c), KeyModifiers::NONE, now);
        }
        self.wait(self.timings.search_debounce_ms + self.timings.frame_ms);

        let ids: Vec<String> = self
            .categories
            .filtered()
            .into_iter()
            .map(|option| option.id.clone())
            .collect();
        for id in ids {
            let now = self.clock.now();
            self.categories.select(&id, now);
            self.dispatch();
        }
        self.snapshot_categories();

        let now = self.clock.now();
        self.categories
            .handle_key(KeyCode::Escape, KeyModifiers::NONE, now);
        self.wait(self.timings.close_animation_ms);
        self.snapshot_categories();
    }

    fn switch_between_pickers(&mut self) {
        self.record("-- opening one picker closes the other");
        let now = self.clock.now();
        self.supplier.open(now);
        self.wait(self.timings.open_settle_ms);

        let now = self.clock.now();
        self.categories.open(now);
        self.dispatch();
        self.wait(self.timings.open_settle_ms);
        self.snapshot_supplier();
        self.snapshot_categories();

        // Focus moves to some other field on the page.
        self.categories_surface.set_focus_within(false);
        let now = self.clock.now();
        self.categories.window_event(WindowEvent::FocusOut, now);
        self.wait(self.timings.close_animation_ms + self.timings.frame_ms);
        self.snapshot_categories();
    }

    fn clear_required_supplier(&mut self) {
        self.record("-- leaving the supplier empty");
        self.supplier.set_value(SelectionValue::none());
        let now = self.clock.now();
        self.supplier.blur(now);
        self.dispatch();
        self.snapshot_supplier();
    }

    fn key_supplier(&mut self, key: KeyCode) {
        let now = self.clock.now();
        self.supplier.handle_key(key, KeyModifiers::NONE, now);
        self.dispatch();
    }

    /// Let `ms` pass, firing whatever falls due on both pickers.
    fn wait(&mut self, ms: u64) {
        let now = self.clock.advance(Duration::from_millis(ms));
        self.supplier.tick(now);
        self.categories.tick(now);
        self.dispatch();
    }

    fn dispatch(&mut self) {
        let mut messages = self.supplier.take_messages();
        messages.extend(self.categories.take_messages());
        for message in messages {
            self.update(message);
        }
    }

    fn update(&mut self, message: FormMessage) {
        self.record(format!("message: {:?}", message));
        match message {
            FormMessage::SupplierChanged(value) => self.supplier.set_value(value),
            FormMessage::SupplierAdded(name) => {
                let id = format!("sup-{}", self.suppliers.len() + 1);
                self.suppliers.push(DropdownOption::new(id.clone(), name));
                match OptionList::new(self.suppliers.clone()) {
                    Ok(list) => {
                        let now = self.clock.now();
                        self.supplier.set_options(list, now);
                        self.supplier.set_value(SelectionValue::single(id));
                    }
                    Err(e) => log::error!("Rejected supplier list: {}", e),
                }
            }
            FormMessage::CategoriesChanged(value) => self.categories.set_value(value),
            FormMessage::SupplierBlurred | FormMessage::OpenChanged { .. } => {}
        }
    }

    fn snapshot_supplier(&mut self) {
        let line = describe("supplier", &self.supplier);
        self.record(line);
    }

    fn snapshot_categories(&mut self) {
        let line = describe("categories", &self.categories);
        self.record(line);
    }

    fn record(&mut self, line: impl Into<String>) {
        let line = format!("[{:>5}ms] {}", self.clock.elapsed.as_millis(), line.into());
        log::debug!("{}", line);
        self.transcript.push(line);
    }
}

/// One-line summary of what a host would render for `dropdown`.
fn describe(name: &str, dropdown: &Dropdown<FormMessage>) -> String {
    let view = dropdown.view();
    let mut line = format!("{}: {:?}", name, view.trigger.label);
    match &view.overlay {
        Some(overlay) => {
            let rows: Vec<&str> = overlay.rows.iter().map(|row| row.name.as_str()).collect();
            line.push_str(&format!(
                " {:?} {:?} rows={:?} highlighted={}",
                overlay.state, overlay.direction, rows, view.highlighted_index
            ));
        }
        None => line.push_str(" closed"),
    }
    if let Some(message) = &view.validation_message {
        line.push_str(&format!(" error={:?}", message));
    }
    line
}

/// Build the form, play the script and return its transcript.
pub fn run(config: &AppConfig) -> Result<Vec<String>, AppError> {
    let mut form = PharmacyForm::new(config)?;
    log::info!(
        "Running demo session with viewport {:?}",
        config.preferences.viewport
    );
    form.run_script();
    Ok(form.into_transcript())
}
