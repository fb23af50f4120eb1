//! Rules and fuzzy system view.
//!
//! Top to bottom: the system (name, variables, save/load), the rule editor,
//! the rule list, and crisp-input evaluation.

use eframe::egui;
use rmvvm::models::{Condition, FuzzyRule, FuzzySet, RuleOperator};

use crate::app::AppState;

pub enum RulesInteraction {
    CreateSystem,
    AddInput,
    AddOutput,
    SaveSystem,
    LoadSystem(String),
    RefreshSaved,
    CreateRule,
    UpdateRule,
    SelectRule(String),
    RemoveRule(String),
    Evaluate,
}

pub fn render_rules_view(ui: &mut egui::Ui, state: &mut AppState) -> Option<RulesInteraction> {
    let mut interaction = None;
    let ctx = &state.context;
    let cache = &mut state.caches.rules;

    let heading = cache.label(ctx, "rules.title", "Rules").to_owned();
    let system_label = cache.label(ctx, "rules.system", "Fuzzy system").to_owned();
    let name_label = cache.label(ctx, "rules.name", "Name").to_owned();
    let description_label = cache.label(ctx, "rules.description", "Description").to_owned();
    let new_system_label = cache.label(ctx, "rules.new_system", "New system").to_owned();
    let inputs_label = cache.label(ctx, "rules.inputs", "Inputs").to_owned();
    let outputs_label = cache.label(ctx, "rules.outputs", "Outputs").to_owned();
    let add_label = cache.label(ctx, "rules.add", "Add").to_owned();
    let save_label = cache.label(ctx, "rules.save", "Save").to_owned();
    let load_label = cache.label(ctx, "rules.load", "Load").to_owned();
    let refresh_label = cache.label(ctx, "rules.refresh", "Refresh").to_owned();
    let no_system_label = cache
        .label(ctx, "rules.no_system", "Create or load a system to add variables")
        .to_owned();
    let editor_label = cache.label(ctx, "rules.editor", "Rule").to_owned();
    let add_condition_label = cache.label(ctx, "rules.add_condition", "Add condition").to_owned();
    let create_label = cache.label(ctx, "rules.create", "Create rule").to_owned();
    let update_label = cache.label(ctx, "rules.update", "Update selected").to_owned();
    let remove_label = cache.label(ctx, "rules.remove", "Remove").to_owned();
    let empty_label = cache.label(ctx, "rules.empty", "No rules yet").to_owned();
    let evaluate_label = cache.label(ctx, "rules.evaluate", "Evaluate").to_owned();
    let colors = cache.colors(ctx).clone();

    ui.heading(heading);
    ui.separator();

    // System
    ui.strong(system_label);
    let form = &mut state.system_form;
    egui::Grid::new("system_form").num_columns(2).spacing([8.0, 4.0]).show(ui, |ui| {
        ui.label(&name_label);
        ui.text_edit_singleline(&mut form.name);
        ui.end_row();

        ui.label(description_label);
        ui.text_edit_singleline(&mut form.description);
        ui.end_row();
    });
    ui.horizontal(|ui| {
        if ui.button(format!("➕ {new_system_label}")).clicked() {
            interaction = Some(RulesInteraction::CreateSystem);
        }
        if ui.button(format!("💾 {save_label}")).clicked() {
            interaction = Some(RulesInteraction::SaveSystem);
        }

        let mut chosen = None;
        egui::ComboBox::from_id_salt("saved_systems")
            .selected_text(load_label)
            .show_ui(ui, |ui| {
                for name in state.system.saved_systems() {
                    if ui.selectable_label(false, name).clicked() {
                        chosen = Some(name.clone());
                    }
                }
            });
        if let Some(name) = chosen {
            interaction = Some(RulesInteraction::LoadSystem(name));
        }
        if ui.small_button(format!("🔄 {refresh_label}")).clicked() {
            interaction = Some(RulesInteraction::RefreshSaved);
        }
    });

    match state.system.system() {
        Some(system) => {
            egui::Grid::new("system_variables").num_columns(2).spacing([8.0, 4.0]).show(ui, |ui| {
                ui.label(&inputs_label);
                ui.horizontal(|ui| {
                    ui.label(system.input_variables.join(", "));
                    ui.add(egui::TextEdit::singleline(&mut form.new_input).desired_width(120.0));
                    if ui.small_button(&add_label).clicked() {
                        interaction = Some(RulesInteraction::AddInput);
                    }
                });
                ui.end_row();

                ui.label(&outputs_label);
                ui.horizontal(|ui| {
                    ui.label(system.output_variables.join(", "));
                    ui.add(egui::TextEdit::singleline(&mut form.new_output).desired_width(120.0));
                    if ui.small_button(&add_label).clicked() {
                        interaction = Some(RulesInteraction::AddOutput);
                    }
                });
                ui.end_row();
            });
        }
        None => {
            ui.weak(no_system_label);
        }
    }
    if let Some(status) = state.system.status() {
        ui.label(status);
    }
    for problem in state.system.validation_errors() {
        ui.colored_label(colors.warning, problem);
    }

    ui.separator();

    // Rule editor
    let (inputs, outputs) = state
        .system
        .system()
        .map(|system| (system.input_variables.clone(), system.output_variables.clone()))
        .unwrap_or_default();
    let sets = state.fuzzy.sets();
    let rule_form = &mut state.rule_form;

    ui.strong(editor_label);
    egui::Grid::new("rule_form").num_columns(2).spacing([8.0, 4.0]).show(ui, |ui| {
        ui.label(&name_label);
        ui.text_edit_singleline(&mut rule_form.name);
        ui.end_row();

        let mut removed = None;
        for (index, condition) in rule_form.antecedent.iter_mut().enumerate() {
            ui.label(if index == 0 { "IF" } else { rule_form.operator.label() });
            ui.horizontal(|ui| {
                condition_editor(ui, ("if", index), condition, &inputs, sets);
                if ui.small_button("✖").clicked() {
                    removed = Some(index);
                }
            });
            ui.end_row();
        }
        if let Some(index) = removed {
            rule_form.remove_condition(index);
        }

        ui.label("");
        ui.horizontal(|ui| {
            if ui.small_button(format!("➕ {add_condition_label}")).clicked() {
                rule_form.add_condition();
            }
            for operator in [RuleOperator::And, RuleOperator::Or] {
                ui.radio_value(&mut rule_form.operator, operator, operator.label());
            }
        });
        ui.end_row();

        ui.label("THEN");
        condition_editor(ui, ("then", 0), &mut rule_form.consequent, &outputs, sets);
        ui.end_row();
    });

    ui.horizontal(|ui| {
        if ui.button(format!("➕ {create_label}")).clicked() {
            interaction = Some(RulesInteraction::CreateRule);
        }
        let has_selection = state.rules.selected().is_some();
        if ui.add_enabled(has_selection, egui::Button::new(&update_label)).clicked() {
            interaction = Some(RulesInteraction::UpdateRule);
        }
    });

    for problem in state.rules.validation_errors() {
        ui.colored_label(colors.warning, problem);
    }

    ui.separator();

    // Rule list
    if state.rules.rules().is_empty() {
        ui.label(empty_label);
    }
    let selected_id = state.rules.selected().map(|rule| rule.id.clone());
    for rule in state.rules.rules() {
        ui.horizontal(|ui| {
            let is_selected = selected_id.as_deref() == Some(rule.id.as_str());
            let text = format!("{}: {}", rule.name, describe_rule(rule, sets));
            if ui.selectable_label(is_selected, text).clicked() {
                interaction = Some(RulesInteraction::SelectRule(rule.id.clone()));
            }
            if ui.small_button(&remove_label).clicked() {
                interaction = Some(RulesInteraction::RemoveRule(rule.id.clone()));
            }
        });
    }

    // Evaluation
    if !inputs.is_empty() {
        ui.separator();
        let values = &mut state.system_form.inputs;
        ui.horizontal_wrapped(|ui| {
            for variable in &inputs {
                ui.label(variable);
                let value = values.entry(variable.clone()).or_insert(0.0);
                ui.add(egui::DragValue::new(value).speed(0.5));
            }
            if ui.button(format!("▶ {evaluate_label}")).clicked() {
                interaction = Some(RulesInteraction::Evaluate);
            }
        });
        for (output, value) in state.system.results() {
            ui.label(format!("{output} = {value:.2}"));
        }
    }

    interaction
}

/// Variable and fuzzy-set pickers for one condition.
fn condition_editor(
    ui: &mut egui::Ui,
    salt: (&str, usize),
    condition: &mut Condition,
    variables: &[String],
    sets: &[FuzzySet],
) {
    egui::ComboBox::from_id_salt(("rule_variable", salt))
        .selected_text(condition.variable.as_str())
        .show_ui(ui, |ui| {
            for variable in variables {
                ui.selectable_value(&mut condition.variable, variable.clone(), variable.as_str());
            }
        });
    ui.label("IS");
    egui::ComboBox::from_id_salt(("rule_set", salt))
        .selected_text(set_name(&condition.fuzzy_set_id, sets))
        .show_ui(ui, |ui| {
            for set in sets {
                ui.selectable_value(&mut condition.fuzzy_set_id, set.id.clone(), set.name.as_str());
            }
        });
}

fn set_name<'a>(id: &'a str, sets: &'a [FuzzySet]) -> &'a str {
    sets.iter()
        .find(|set| set.id == id)
        .map_or(id, |set| set.name.as_str())
}

/// `IF temperature IS cold AND ... THEN heating IS high`, with set names
/// where the ids resolve.
fn describe_rule(rule: &FuzzyRule, sets: &[FuzzySet]) -> String {
    let clause = |condition: &Condition| {
        format!("{} IS {}", condition.variable, set_name(&condition.fuzzy_set_id, sets))
    };
    let joiner = format!(" {} ", rule.operator.label());
    let antecedent: Vec<String> = rule.antecedent.iter().map(&clause).collect();
    format!("IF {} THEN {}", antecedent.join(&joiner), clause(&rule.consequent))
}
