//! Built-in instrument templates.

use super::task::{ForcedChoiceTask, MaxDiffTask, PairedComparisonTask, Task, TaskOption};
use super::{Block, InstrumentSpec, SPEC_VERSION};
use crate::enums::TemplateKind;

/// Spec for a new instrument created from `kind`.
#[must_use]
pub fn spec_for(kind: TemplateKind) -> InstrumentSpec {
    match kind {
        TemplateKind::Paired => paired_comparison_five(),
        TemplateKind::MaxDiff => maxdiff_demo(),
        TemplateKind::Forced => forced_choice_demo(),
    }
}

fn paired(id: &str, prompt: &str, left: (&str, &str), right: (&str, &str)) -> Task {
    Task::PairedComparison(PairedComparisonTask {
        id: id.into(),
        prompt: prompt.into(),
        left: TaskOption::new(left.0, left.1),
        right: TaskOption::new(right.0, right.1),
    })
}

fn single_block(title: &str, tasks: Vec<Task>) -> InstrumentSpec {
    InstrumentSpec {
        version: SPEC_VERSION.into(),
        blocks: vec![Block {
            id: "main".into(),
            title: title.into(),
            tasks,
        }],
    }
}

/// Five fixed paired-comparison tasks.
#[must_use]
pub fn paired_comparison_five() -> InstrumentSpec {
    single_block(
        "Karşılaştırma Görevleri",
        vec![
            paired(
                "pc_1",
                "Hangisi sana daha çok uyuyor?",
                ("a1", "Belirsizlik olsa da harekete geçerim."),
                ("a2", "Netleşmeden adım atmayı sevmem."),
            ),
            paired(
                "pc_2",
                "Hangisi sana daha yakın?",
                ("b1", "Hızlı karar veririm; sonra düzeltirim."),
                ("b2", "Yavaş karar veririm; sonra değiştirmem."),
            ),
            paired(
                "pc_3",
                "Hangisi daha doğru tarif eder?",
                ("c1", "Yeni fikirlere kolayca ısınırım."),
                ("c2", "Yeni fikirlere temkinli yaklaşırım."),
            ),
            paired(
                "pc_4",
                "Hangisi sana daha çok uyar?",
                ("d1", "Risk almak beni canlı tutar."),
                ("d2", "Güvenli seçenekler beni rahatlatır."),
            ),
            paired(
                "pc_5",
                "Hangisine daha çok katılırsın?",
                ("e1", "Planlarım sık değişebilir."),
                ("e2", "Planlarıma sadık kalmayı tercih ederim."),
            ),
        ],
    )
}

#[must_use]
pub fn maxdiff_demo() -> InstrumentSpec {
    single_block(
        "MaxDiff Demo",
        vec![Task::MaxDiff(MaxDiffTask {
            id: "md_1".into(),
            prompt: "Aşağıdakilerden EN uygun ve EN uygunsuz olanı seç.".into(),
            items: vec![
                TaskOption::new("m1", "Hız"),
                TaskOption::new("m2", "Güvenilirlik"),
                TaskOption::new("m3", "Yaratıcılık"),
                TaskOption::new("m4", "Düzen"),
            ],
        })],
    )
}

#[must_use]
pub fn forced_choice_demo() -> InstrumentSpec {
    single_block(
        "Forced-Choice Demo",
        vec![Task::ForcedChoice(ForcedChoiceTask {
            id: "fc_1".into(),
            prompt: "Hangisi daha çok sana benziyor?".into(),
            statements: vec![
                TaskOption::new("s1", "İnsanlarla hızlıca bağ kurarım."),
                TaskOption::new("s2", "Karar vermeden önce epey düşünürüm."),
                TaskOption::new("s3", "Bir işi bitirmeden rahat edemem."),
                TaskOption::new("s4", "Yeni fikirlere meraklıyımdır."),
            ],
            pick: Some(2),
        })],
    )
}

/// Placeholder paired task numbered `n` (1-based), appended by the editor.
#[must_use]
pub fn new_paired_task(n: usize) -> Task {
    Task::PairedComparison(PairedComparisonTask {
        id: format!("pc_{n}"),
        prompt: "Hangisi daha uygun?".into(),
        left: TaskOption::new(format!("l_{n}"), "Sol seçenek"),
        right: TaskOption::new(format!("r_{n}"), "Sağ seçenek"),
    })
}
