//! Prompts for slide content and slide component generation.
//!
//! Centralising every prompt here serves two purposes:
//!
//! 1. **Single source of truth**: the per-archetype structure and the
//!    skeletons the model fills in live next to each other, and
//!    [`template_placeholders`] derives the cleanup list for the
//!    post-processor from the very same skeletons.
//!
//! 2. **Testability**: unit tests inspect prompts directly without a model.
//!
//! Prompts are written in Russian (the deck generator's home deployment);
//! the language of the *answer* is controlled by [`OutputLanguage`].

use crate::archetype::{ContentArchetype, Layout, SlideArchetype, Theme};
use crate::templates::Palette;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Language the generated slide text must be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputLanguage {
    #[default]
    Russian,
    English,
}

impl OutputLanguage {
    /// Parse `ru`/`russian`/`en`/`english`; unknown values keep Russian.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "en" | "eng" | "english" => OutputLanguage::English,
            _ => OutputLanguage::Russian,
        }
    }

    /// The output-language line of the content prompt.
    pub fn instruction(self) -> &'static str {
        match self {
            OutputLanguage::Russian => "Пиши только на русском языке.",
            OutputLanguage::English => {
                "Пиши только на английском языке (English), включая заголовки."
            }
        }
    }

    /// Heading prepended to an opening slide that lacks one.
    pub fn intro_heading(self) -> &'static str {
        match self {
            OutputLanguage::Russian => "# Введение",
            OutputLanguage::English => "# Introduction",
        }
    }

    /// Heading prepended to a closing slide that lacks one.
    pub fn conclusion_heading(self) -> &'static str {
        match self {
            OutputLanguage::Russian => "# Заключение",
            OutputLanguage::English => "# Conclusion",
        }
    }
}

// ── Content prompt ───────────────────────────────────────────────────────

const CONTENT_PREAMBLE: &str = "Ты — опытный автор образовательных презентаций. \
Твоя задача — написать содержимое одного слайда.";

const CONTENT_RULES: &str = r#"Требования к ответу:
- Используй разметку Markdown: заголовок слайда первого уровня (#), подзаголовки (##), маркированные списки (*).
- Пиши кратко и по существу: один слайд — одна мысль.
- Не добавляй вступительных фраз, пояснений и комментариев к ответу.
- Не повторяй эти инструкции."#;

/// Structural instructions for an archetype.
fn archetype_instructions(archetype: SlideArchetype) -> &'static str {
    match archetype {
        SlideArchetype::Title => {
            "Это титульный слайд. Нужны: яркий заголовок презентации, подзаголовок в одно \
предложение и короткое введение (2–3 предложения), объясняющее, о чём пойдёт речь."
        }
        SlideArchetype::Definition => {
            "Это слайд с определением. Дай чёткое определение ключевого понятия темы, затем \
3–4 ключевые характеристики в виде списка."
        }
        SlideArchetype::History => {
            "Это исторический слайд. Перечисли 3–5 ключевых этапов развития темы в \
хронологическом порядке. Каждый этап — пункт списка «период: событие», под ним одна \
строка пояснения."
        }
        SlideArchetype::Statistics => {
            "Это слайд со статистикой. Приведи 3–5 показателей в формате «значение: описание», \
где значение — число, процент или множитель. Завершай одной строкой вывода."
        }
        SlideArchetype::Comparison => {
            "Это слайд сравнения. Сравни два подхода, объекта или точки зрения. Для каждого \
создай подзаголовок второго уровня (##) и 3 пункта списка под ним."
        }
        SlideArchetype::Example => {
            "Это слайд с примером. Опиши один конкретный реальный пример или кейс: контекст, \
что было сделано и какой получен результат."
        }
        SlideArchetype::Application => {
            "Это слайд о практическом применении. Перечисли 3–4 области применения, для \
каждой — одно предложение о пользе."
        }
        SlideArchetype::Challenges => {
            "Это слайд о проблемах и вызовах. Перечисли 3–4 главные проблемы и для каждой \
кратко укажи возможный путь решения."
        }
        SlideArchetype::Trends => {
            "Это слайд о тенденциях и будущем. Опиши 3–4 тренда и перспективы развития темы \
на ближайшие годы."
        }
        SlideArchetype::Conclusion => {
            "Это заключительный слайд. Подведи итоги: 3–4 главных вывода списком и одна \
завершающая фраза с благодарностью за внимание."
        }
        SlideArchetype::Generalized => {
            "Раскрой один важный аспект темы: заголовок, короткое пояснение и 3–4 пункта \
списка."
        }
    }
}

/// Placeholder-laden Markdown skeleton the model is asked to fill in.
pub fn skeleton(archetype: SlideArchetype) -> &'static str {
    match archetype {
        SlideArchetype::Title => {
            "# [Заголовок презентации]\n\n\
## [Подзаголовок]\n\n\
[Краткое введение в тему]"
        }
        SlideArchetype::Definition => {
            "# [Заголовок слайда]\n\n\
[Определение понятия]\n\n\
* [Характеристика 1]\n\
* [Характеристика 2]\n\
* [Характеристика 3]"
        }
        SlideArchetype::History => {
            "# [Заголовок слайда]\n\n\
* [Период]: [Событие]\n\
[Пояснение]\n\
* [Период]: [Событие]\n\
[Пояснение]\n\
* [Период]: [Событие]\n\
[Пояснение]"
        }
        SlideArchetype::Statistics => {
            "# [Заголовок слайда]\n\n\
* [Значение]: [Описание показателя]\n\
* [Значение]: [Описание показателя]\n\
* [Значение]: [Описание показателя]\n\n\
[Вывод]"
        }
        SlideArchetype::Comparison => {
            "# [Заголовок слайда]\n\n\
## [Первый вариант]\n\
* [Пункт 1]\n\
* [Пункт 2]\n\
* [Пункт 3]\n\n\
## [Второй вариант]\n\
* [Пункт 1]\n\
* [Пункт 2]\n\
* [Пункт 3]"
        }
        SlideArchetype::Example => {
            "# [Заголовок слайда]\n\n\
## [Название примера]\n\n\
* [Контекст]\n\
* [Что было сделано]\n\
* [Результат]"
        }
        SlideArchetype::Application => {
            "# [Заголовок слайда]\n\n\
* [Область применения]: [Польза]\n\
* [Область применения]: [Польза]\n\
* [Область применения]: [Польза]"
        }
        SlideArchetype::Challenges => {
            "# [Заголовок слайда]\n\n\
* [Проблема]: [Путь решения]\n\
* [Проблема]: [Путь решения]\n\
* [Проблема]: [Путь решения]"
        }
        SlideArchetype::Trends => {
            "# [Заголовок слайда]\n\n\
* [Тренд 1]\n\
* [Тренд 2]\n\
* [Тренд 3]\n\n\
[Перспективы]"
        }
        SlideArchetype::Conclusion => {
            "# [Заголовок слайда]\n\n\
* [Вывод 1]\n\
* [Вывод 2]\n\
* [Вывод 3]\n\n\
[Завершающая фраза]"
        }
        SlideArchetype::Generalized => {
            "# [Заголовок слайда]\n\n\
[Пояснение]\n\n\
* [Пункт 1]\n\
* [Пункт 2]\n\
* [Пункт 3]"
        }
    }
}

static RE_PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[^\[\]\n]+\]").unwrap());

static PLACEHOLDERS: Lazy<Vec<String>> = Lazy::new(|| {
    let set: BTreeSet<String> = SlideArchetype::ALL
        .into_iter()
        .flat_map(|a| RE_PLACEHOLDER.find_iter(skeleton(a)).map(|m| m.as_str().to_string()))
        .collect();
    set.into_iter().collect()
});

/// Every bracketed placeholder token that appears in any skeleton.
pub fn template_placeholders() -> &'static [String] {
    &PLACEHOLDERS
}

/// Full content prompt for one slide.
pub fn build_content_prompt(
    topic: &str,
    position: usize,
    total: usize,
    archetype: SlideArchetype,
    language: OutputLanguage,
) -> String {
    format!(
        "{CONTENT_PREAMBLE}\n\n\
Тема презентации: «{topic}»\n\
Слайд {position} из {total}.\n\n\
{CONTENT_RULES}\n\
- {language}\n\n\
Тип слайда: {kind}\n\
{instructions}\n\n\
Заполни шаблон, заменив текст в квадратных скобках на содержимое:\n\n\
{skeleton}\n",
        topic = topic.trim(),
        language = language.instruction(),
        kind = archetype.as_str(),
        instructions = archetype_instructions(archetype),
        skeleton = skeleton(archetype),
    )
}

// ── Code prompt ──────────────────────────────────────────────────────────

fn layout_rules(layout: Layout) -> &'static str {
    match layout {
        Layout::Centered => {
            "- Весь контент выровнен по центру экрана.\n\
- Крупный заголовок, под ним подзаголовок или короткий текст.\n\
- Минимум декоративных элементов, много свободного пространства."
        }
        Layout::TwoColumn => {
            "- Две колонки: слева заголовок и пояснение, справа список пунктов.\n\
- На мобильных устройствах колонки располагаются друг под другом."
        }
        Layout::Grid => {
            "- Сетка карточек (2–4 колонки в зависимости от ширины экрана).\n\
- Каждая карточка — отдельный пункт или показатель."
        }
        Layout::Featured => {
            "- Крупный акцентный блок с главной мыслью слайда.\n\
- Второстепенные пункты — ряд небольших карточек под ним."
        }
        Layout::Timeline => {
            "- Вертикальная временная шкала: линия, точки-маркеры и подписи.\n\
- Элементы появляются по очереди сверху вниз."
        }
    }
}

/// Full code prompt for one slide.
pub fn build_code_prompt(
    slide_content: &str,
    archetype: ContentArchetype,
    layout: Layout,
    theme: Theme,
) -> String {
    let palette = Palette::for_theme(theme);
    format!(
        "Сгенерируй React-компонент на TypeScript для слайда презентации.\n\n\
Содержание слайда:\n\"\"\"\n{content}\n\"\"\"\n\n\
Тип слайда: {archetype}\n\
Макет: {layout}\n\
Тема: {theme}\n\n\
Требования:\n\
- Компонент должен быть адаптивным: корректно выглядеть на мобильных устройствах и на десктопе.\n\
- Добавь плавную анимацию появления элементов с помощью framer-motion.\n\
- Используй только встроенные стили (inline styles), без внешних CSS-файлов и библиотек компонентов.\n\
- Используй функциональный компонент и современные паттерны React.\n\
- Весь текст слайда должен быть взят из содержания выше.\n\n\
Оформление темы «{theme}»:\n\
- Цвет фона: {background}\n\
- Цвет текста: {text}\n\
- Акцентный цвет: {accent}\n\n\
Макет «{layout}»:\n\
{layout_rules}\n\n\
Верни только код компонента, без пояснений. Код должен начинаться со строки \
`import React from 'react';` и заканчиваться строкой `export default` с именем компонента.\n",
        content = slide_content.trim(),
        background = palette.background,
        text = palette.text,
        accent = palette.primary,
        layout_rules = layout_rules(layout),
    )
}
