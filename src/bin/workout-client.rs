use chrono::Utc;
use clap::{ArgAction, Parser};
use eframe::{egui, App, CreationContext, Frame};
use egui::{Align, Align2, Color32, Layout, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};
use tracing::{info, warn};

use workout_tracker::client::{
    exercise_summary, format_date, ApiClient, WorkoutForm, DEFAULT_API_URL,
};
use workout_tracker::config::setup_logging;
use workout_tracker::{Workout, WorkoutId};

#[derive(Debug, Parser)]
#[command(version, about = "Desktop client for the workout tracking API")]
struct ClientArgs {
    /// Base URL of a running workout-server
    #[arg(long, env = "WORKOUT_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), eframe::Error> {
    let args = ClientArgs::parse();
    setup_logging(args.verbose);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 860.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Workout Tracker",
        options,
        Box::new(move |cc| Ok(Box::new(WorkoutApp::new(cc, ApiClient::new(args.api_url))))),
    )
}

#[derive(PartialEq, Clone, Copy)]
enum DisplayMode {
    Home,
    Workouts,
    NewWorkout,
}

enum ListState {
    NotLoaded,
    Loaded(Vec<Workout>),
    Failed(String),
}

struct WorkoutApp {
    api: ApiClient,
    display_mode: DisplayMode,
    list: ListState,
    form: WorkoutForm,
    form_error: Option<String>,
    pending_delete: Option<Workout>,
    alert: Option<String>,
}

impl WorkoutApp {
    fn new(cc: &CreationContext, api: ApiClient) -> Self {
        let mut style = (*cc.egui_ctx.style()).clone();
        style.text_styles.insert(
            egui::TextStyle::Body,
            egui::FontId::new(18.0, egui::FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Heading,
            egui::FontId::new(30.0, egui::FontFamily::Proportional),
        );
        cc.egui_ctx.set_style(style);

        info!(api = api.base_url(), "workout client started");
        WorkoutApp {
            api,
            display_mode: DisplayMode::Home,
            list: ListState::NotLoaded,
            form: WorkoutForm::default(),
            form_error: None,
            pending_delete: None,
            alert: None,
        }
    }

    fn switch_to(&mut self, mode: DisplayMode) {
        if mode == DisplayMode::Workouts && self.display_mode != DisplayMode::Workouts {
            self.fetch_workouts();
        }
        self.display_mode = mode;
    }

    fn fetch_workouts(&mut self) {
        self.list = match self.api.list_workouts() {
            Ok(workouts) => ListState::Loaded(workouts),
            Err(e) => {
                warn!(error = %e, "failed to fetch workouts");
                ListState::Failed("Failed to fetch workouts".to_string())
            }
        };
    }

    fn submit_form(&mut self) {
        self.form_error = None;
        let draft = match self.form.to_draft(Utc::now()) {
            Ok(draft) => draft,
            Err(e) => {
                self.form_error = Some(e.to_string());
                return;
            }
        };

        match self.api.create_workout(&draft) {
            Ok(workout) => {
                info!(id = %workout.id, "workout created");
                self.form.reset();
                self.switch_to(DisplayMode::Workouts);
            }
            Err(e) => {
                warn!(error = %e, "failed to create workout");
                self.form_error = Some("Failed to create workout".to_string());
            }
        }
    }

    fn confirm_delete(&mut self, id: &WorkoutId) {
        match self.api.delete_workout(id.as_str()) {
            Ok(()) => {
                if let ListState::Loaded(workouts) = &mut self.list {
                    workouts.retain(|w| &w.id != id);
                }
            }
            Err(e) => {
                warn!(error = %e, %id, "failed to delete workout");
                self.alert = Some("Failed to delete workout".to_string());
            }
        }
    }
}

impl App for WorkoutApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.with_layout(Layout::top_down(Align::Min), |ui| {
                ui.add_space(10.0);

                ui.horizontal(|ui| {
                    for (mode, label) in [
                        (DisplayMode::Home, "Home"),
                        (DisplayMode::Workouts, "My Workouts"),
                        (DisplayMode::NewWorkout, "New Workout"),
                    ] {
                        if ui.selectable_label(self.display_mode == mode, label).clicked() {
                            self.switch_to(mode);
                        }
                    }
                });

                ui.add_space(20.0);

                match self.display_mode {
                    DisplayMode::Home => self.show_home(ui),
                    DisplayMode::Workouts => self.show_workouts(ui),
                    DisplayMode::NewWorkout => self.show_new_workout(ui),
                }
            });
        });

        self.show_delete_confirmation(ctx);
        self.show_alert(ctx);
    }
}

impl WorkoutApp {
    fn show_home(&mut self, ui: &mut Ui) {
        ui.label(RichText::new("WorkoutApp").heading().size(48.0).strong());
        ui.label(RichText::new("Track your fitness journey with ease").size(22.0));
        ui.add_space(30.0);

        ui.horizontal(|ui| {
            ui.group(|ui| {
                ui.vertical(|ui| {
                    ui.label(RichText::new("Log Workouts").heading());
                    ui.label("Record your exercises, sets, reps, and weights");
                    if ui.button("Create Workout").clicked() {
                        self.switch_to(DisplayMode::NewWorkout);
                    }
                });
            });
            ui.group(|ui| {
                ui.vertical(|ui| {
                    ui.label(RichText::new("View History").heading());
                    ui.label("Browse and manage your workout history");
                    if ui.button("View Workouts").clicked() {
                        self.switch_to(DisplayMode::Workouts);
                    }
                });
            });
        });
    }

    fn show_workouts(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.label(RichText::new("My Workouts").heading().strong());
            if ui.button("Refresh").clicked() {
                self.fetch_workouts();
            }
        });
        ui.add_space(10.0);

        let workouts = match &self.list {
            ListState::NotLoaded => {
                ui.label("Loading workouts...");
                return;
            }
            ListState::Failed(message) => {
                ui.label(RichText::new(format!("Error: {}", message)).color(Color32::RED));
                return;
            }
            ListState::Loaded(workouts) => workouts,
        };

        if workouts.is_empty() {
            ui.label("No workouts yet. Start tracking your fitness journey!");
            if ui.button("Create Your First Workout").clicked() {
                self.display_mode = DisplayMode::NewWorkout;
            }
            return;
        }

        let mut delete_request = None;
        ScrollArea::vertical().show(ui, |ui| {
            ui.set_width(ui.available_width());
            for workout in workouts {
                ui.push_id(&workout.id, |ui| {
                    ui.group(|ui| {
                        ui.set_width(ui.available_width());
                        ui.horizontal(|ui| {
                            ui.label(RichText::new(&workout.name).size(24.0).strong());
                            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                                if ui.button(RichText::new("Delete").color(Color32::RED)).clicked() {
                                    delete_request = Some(workout.clone());
                                }
                            });
                        });
                        ui.label(format!("Date: {}", format_date(&workout.date)));
                        ui.label(format!("Duration: {} minutes", workout.duration));
                        ui.label(format!("Exercises: {}", workout.exercises.len()));
                        ui.separator();
                        show_exercise_table(ui, workout);
                    });
                });
                ui.add_space(10.0);
            }
        });

        if delete_request.is_some() {
            self.pending_delete = delete_request;
        }
    }

    fn show_new_workout(&mut self, ui: &mut Ui) {
        ui.label(RichText::new("New Workout").heading().strong());
        ui.add_space(10.0);

        if let Some(error) = &self.form_error {
            ui.label(RichText::new(error).color(Color32::RED).strong());
            ui.add_space(10.0);
        }

        ui.label("Workout Name");
        ui.add(egui::TextEdit::singleline(&mut self.form.name).hint_text("e.g., Upper Body Workout"));
        ui.label("Duration (minutes)");
        ui.add(egui::TextEdit::singleline(&mut self.form.duration).hint_text("e.g., 45"));
        ui.add_space(10.0);

        ui.horizontal(|ui| {
            ui.label(RichText::new("Exercises").size(22.0).strong());
            if ui.button("+ Add Exercise").clicked() {
                self.form.add_exercise();
            }
        });

        let mut remove = None;
        let removable = self.form.exercises.len() > 1;
        ScrollArea::vertical().max_height(420.0).show(ui, |ui| {
            for (index, row) in self.form.exercises.iter_mut().enumerate() {
                ui.push_id(index, |ui| {
                    ui.group(|ui| {
                        ui.horizontal(|ui| {
                            ui.label(RichText::new(format!("Exercise {}", index + 1)).strong());
                            if removable && ui.button("Remove").clicked() {
                                remove = Some(index);
                            }
                        });
                        ui.horizontal(|ui| {
                            ui.label("Name");
                            ui.add(egui::TextEdit::singleline(&mut row.name).hint_text("e.g., Bench Press"));
                        });
                        ui.horizontal(|ui| {
                            ui.label("Sets");
                            ui.add(egui::DragValue::new(&mut row.sets).range(1..=100));
                            ui.label("Reps");
                            ui.add(egui::DragValue::new(&mut row.reps).range(1..=1000));
                            ui.label("Weight (kg) - Optional");
                            ui.add(egui::TextEdit::singleline(&mut row.weight).hint_text("e.g., 60").desired_width(80.0));
                        });
                    });
                });
            }
        });
        if let Some(index) = remove {
            self.form.remove_exercise(index);
        }

        ui.add_space(10.0);
        ui.horizontal(|ui| {
            if ui.button(RichText::new("Create Workout").size(20.0)).clicked() {
                self.submit_form();
            }
            if ui.button(RichText::new("Cancel").size(20.0)).clicked() {
                self.form_error = None;
                self.switch_to(DisplayMode::Workouts);
            }
        });
    }

    fn show_delete_confirmation(&mut self, ctx: &egui::Context) {
        let Some(workout) = self.pending_delete.clone() else {
            return;
        };

        let mut answer = None;
        egui::Window::new("Delete workout")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(format!("Are you sure you want to delete \"{}\"?", workout.name));
                ui.horizontal(|ui| {
                    if ui.button("Delete").clicked() {
                        answer = Some(true);
                    }
                    if ui.button("Cancel").clicked() {
                        answer = Some(false);
                    }
                });
            });

        if let Some(confirmed) = answer {
            self.pending_delete = None;
            if confirmed {
                self.confirm_delete(&workout.id);
            }
        }
    }

    fn show_alert(&mut self, ctx: &egui::Context) {
        let Some(message) = self.alert.clone() else {
            return;
        };

        egui::Window::new("Error")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(RichText::new(&message).color(Color32::RED));
                if ui.button("OK").clicked() {
                    self.alert = None;
                }
            });
    }
}

fn show_exercise_table(ui: &mut Ui, workout: &Workout) {
    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::remainder())
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .header(22.0, |mut header| {
            header.col(|ui| {
                ui.strong("Exercise");
            });
            header.col(|ui| {
                ui.strong("Sets");
            });
            header.col(|ui| {
                ui.strong("Reps");
            });
            header.col(|ui| {
                ui.strong("Weight");
            });
        })
        .body(|mut body| {
            for exercise in &workout.exercises {
                body.row(20.0, |mut row| {
                    row.col(|ui| {
                        ui.label(exercise.name.as_str()).on_hover_text(exercise_summary(exercise));
                    });
                    row.col(|ui| {
                        ui.label(RichText::new(exercise.sets.to_string()).color(Color32::BLUE));
                    });
                    row.col(|ui| {
                        ui.label(RichText::new(exercise.reps.to_string()).color(Color32::RED));
                    });
                    row.col(|ui| {
                        match exercise.weight {
                            Some(weight) => ui.label(format!("{} kg", weight)),
                            None => ui.label("bodyweight"),
                        };
                    });
                });
            }
        });
}
