//! Renderers for content archetypes with a dedicated slide design.

use super::{component, points_of, subheading_of, Palette};
use crate::markdown::{self, ComparisonSection, DataItem, TimelineItem};
use serde::Serialize;

// ── Title ────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct TitleData {
    title: String,
    subtitle: String,
    tags: Vec<String>,
}

const TITLE_STYLES: &str = r#"
const styles: Record<string, React.CSSProperties> = {
  root: {
    minHeight: '100vh',
    display: 'flex',
    flexDirection: 'column',
    alignItems: 'center',
    justifyContent: 'center',
    background: palette.gradient,
    color: palette.text,
    padding: '4rem',
    textAlign: 'center',
  },
  title: { fontSize: '4rem', fontWeight: 800, margin: 0, color: palette.primary },
  rule: { width: '6rem', height: '0.35rem', background: palette.accent, margin: '2rem auto', borderRadius: '999px' },
  subtitle: { fontSize: '1.5rem', color: palette.secondary, maxWidth: '48rem' },
  tags: { display: 'flex', gap: '0.75rem', marginTop: '2.5rem', flexWrap: 'wrap', justifyContent: 'center' },
  tag: { padding: '0.5rem 1.25rem', borderRadius: '999px', background: palette.cardBackground, border: `1px solid ${palette.primary}` },
};
"#;

const TITLE_MARKUP: &str = r#"
    <div style={styles.root}>
      <motion.h1
        style={styles.title}
        initial={{ opacity: 0, y: -40 }}
        animate={{ opacity: 1, y: 0 }}
        transition={{ duration: 0.8 }}
      >
        {slide.title}
      </motion.h1>
      <motion.div style={styles.rule} initial={{ scaleX: 0 }} animate={{ scaleX: 1 }} transition={{ delay: 0.5 }} />
      {slide.subtitle && (
        <motion.p style={styles.subtitle} initial={{ opacity: 0 }} animate={{ opacity: 1 }} transition={{ delay: 0.8 }}>
          {slide.subtitle}
        </motion.p>
      )}
      <div style={styles.tags}>
        {slide.tags.map((tag, i) => (
          <motion.span
            key={i}
            style={styles.tag}
            initial={{ opacity: 0, y: 20 }}
            animate={{ opacity: 1, y: 0 }}
            transition={{ delay: 1 + i * 0.15 }}
          >
            {tag}
          </motion.span>
        ))}
      </div>
    </div>"#;

pub(super) fn title(content: &str, palette: &Palette) -> String {
    let subtitle = subheading_of(content)
        .or_else(|| markdown::extract_paragraphs(content).into_iter().next())
        .unwrap_or_default();
    let data = TitleData {
        title: markdown::extract_title(content),
        subtitle,
        tags: markdown::extract_bullet_points(content).into_iter().take(4).collect(),
    };
    component("TitleSlide", palette, &data, TITLE_STYLES, TITLE_MARKUP)
}

// ── Conclusion ───────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ConclusionData {
    title: String,
    summary: Vec<String>,
    takeaways: Vec<String>,
}

const CONCLUSION_STYLES: &str = r#"
const styles: Record<string, React.CSSProperties> = {
  root: { minHeight: '100vh', background: palette.background, color: palette.text, padding: '4rem 6rem' },
  title: { fontSize: '3rem', fontWeight: 700, color: palette.primary, marginBottom: '1.5rem' },
  summary: { fontSize: '1.25rem', lineHeight: 1.7, color: palette.secondary, maxWidth: '56rem' },
  list: { listStyle: 'none', padding: 0, marginTop: '2.5rem', display: 'grid', gap: '1rem' },
  item: { display: 'flex', alignItems: 'center', gap: '1rem', fontSize: '1.25rem' },
  check: {
    width: '2rem',
    height: '2rem',
    borderRadius: '50%',
    background: palette.accent,
    color: palette.background,
    display: 'flex',
    alignItems: 'center',
    justifyContent: 'center',
    fontWeight: 700,
  },
};

const listVariants = {
  hidden: { opacity: 0 },
  show: { opacity: 1, transition: { staggerChildren: 0.2, delayChildren: 0.4 } },
};

const itemVariants = {
  hidden: { opacity: 0, x: -30 },
  show: { opacity: 1, x: 0 },
};
"#;

const CONCLUSION_MARKUP: &str = r#"
    <section style={styles.root}>
      <motion.h2 style={styles.title} initial={{ opacity: 0 }} animate={{ opacity: 1 }}>
        {slide.title}
      </motion.h2>
      {slide.summary.map((line, i) => (
        <p key={i} style={styles.summary}>{line}</p>
      ))}
      <motion.ul style={styles.list} variants={listVariants} initial="hidden" animate="show">
        {slide.takeaways.map((point, i) => (
          <motion.li key={i} style={styles.item} variants={itemVariants}>
            <span style={styles.check}>✓</span>
            <span>{point}</span>
          </motion.li>
        ))}
      </motion.ul>
    </section>"#;

pub(super) fn conclusion(content: &str, palette: &Palette) -> String {
    let data = ConclusionData {
        title: markdown::extract_title(content),
        summary: markdown::extract_paragraphs(content).into_iter().take(2).collect(),
        takeaways: points_of(content),
    };
    component("ConclusionSlide", palette, &data, CONCLUSION_STYLES, CONCLUSION_MARKUP)
}

// ── Comparison ───────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ComparisonData {
    title: String,
    left: ComparisonSection,
    right: ComparisonSection,
}

const COMPARISON_STYLES: &str = r#"
const styles: Record<string, React.CSSProperties> = {
  root: { minHeight: '100vh', background: palette.gradient, color: palette.text, padding: '3rem 4rem' },
  title: { fontSize: '2.75rem', fontWeight: 700, textAlign: 'center', marginBottom: '3rem' },
  row: { display: 'grid', gridTemplateColumns: '1fr auto 1fr', gap: '2rem', alignItems: 'stretch' },
  card: { background: palette.cardBackground, borderRadius: '1rem', padding: '2rem', boxShadow: '0 10px 30px rgba(0,0,0,0.08)' },
  cardTitle: { fontSize: '1.75rem', fontWeight: 600, marginBottom: '1.25rem' },
  point: { fontSize: '1.1rem', margin: '0.75rem 0', lineHeight: 1.5 },
  versus: {
    alignSelf: 'center',
    width: '4rem',
    height: '4rem',
    borderRadius: '50%',
    background: palette.accent,
    color: palette.background,
    display: 'flex',
    alignItems: 'center',
    justifyContent: 'center',
    fontWeight: 800,
  },
};
"#;

const COMPARISON_MARKUP: &str = r#"
    <div style={styles.root}>
      <h2 style={styles.title}>{slide.title}</h2>
      <div style={styles.row}>
        <motion.div
          style={{ ...styles.card, borderTop: `4px solid ${palette.primary}` }}
          initial={{ opacity: 0, x: -60 }}
          animate={{ opacity: 1, x: 0 }}
          transition={{ duration: 0.6 }}
        >
          <h3 style={{ ...styles.cardTitle, color: palette.primary }}>{slide.left.title}</h3>
          {slide.left.points.map((point, i) => (
            <p key={i} style={styles.point}>• {point}</p>
          ))}
        </motion.div>
        <motion.div style={styles.versus} initial={{ scale: 0 }} animate={{ scale: 1 }} transition={{ delay: 0.6 }}>
          VS
        </motion.div>
        <motion.div
          style={{ ...styles.card, borderTop: `4px solid ${palette.secondary}` }}
          initial={{ opacity: 0, x: 60 }}
          animate={{ opacity: 1, x: 0 }}
          transition={{ duration: 0.6 }}
        >
          <h3 style={{ ...styles.cardTitle, color: palette.secondary }}>{slide.right.title}</h3>
          {slide.right.points.map((point, i) => (
            <p key={i} style={styles.point}>• {point}</p>
          ))}
        </motion.div>
      </div>
    </div>"#;

pub(super) fn comparison(content: &str, palette: &Palette) -> String {
    let mut sections = markdown::extract_comparison_sections(content).into_iter();
    // extract_comparison_sections always returns at least two
    let left = sections.next().unwrap_or_else(|| ComparisonSection {
        title: String::new(),
        points: Vec::new(),
    });
    let right = sections.next().unwrap_or_else(|| ComparisonSection {
        title: String::new(),
        points: Vec::new(),
    });
    let data = ComparisonData {
        title: markdown::extract_title(content),
        left,
        right,
    };
    component("ComparisonSlide", palette, &data, COMPARISON_STYLES, COMPARISON_MARKUP)
}

// ── Timeline ─────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct TimelineData {
    title: String,
    items: Vec<TimelineItem>,
}

const TIMELINE_STYLES: &str = r#"
const styles: Record<string, React.CSSProperties> = {
  root: { minHeight: '100vh', background: palette.background, color: palette.text, padding: '3rem 5rem' },
  title: { fontSize: '2.75rem', fontWeight: 700, color: palette.primary, marginBottom: '3rem' },
  track: { position: 'relative', borderLeft: `3px solid ${palette.primary}`, marginLeft: '1rem', paddingLeft: '2.5rem' },
  entry: { position: 'relative', marginBottom: '2.25rem' },
  dot: {
    position: 'absolute',
    left: '-3.2rem',
    top: '0.3rem',
    width: '1.3rem',
    height: '1.3rem',
    borderRadius: '50%',
    background: palette.accent,
    border: `3px solid ${palette.background}`,
  },
  entryTitle: { fontSize: '1.4rem', fontWeight: 600 },
  entryText: { fontSize: '1.05rem', color: palette.secondary, marginTop: '0.35rem' },
};
"#;

const TIMELINE_MARKUP: &str = r#"
    <div style={styles.root}>
      <h2 style={styles.title}>{slide.title}</h2>
      <div style={styles.track}>
        {slide.items.map((item, i) => (
          <motion.div
            key={i}
            style={styles.entry}
            initial={{ opacity: 0, y: 30 }}
            animate={{ opacity: 1, y: 0 }}
            transition={{ delay: i * 0.25 }}
          >
            <span style={styles.dot} />
            <div style={styles.entryTitle}>{item.title}</div>
            {item.description && <div style={styles.entryText}>{item.description}</div>}
          </motion.div>
        ))}
      </div>
    </div>"#;

pub(super) fn timeline(content: &str, palette: &Palette) -> String {
    let data = TimelineData {
        title: markdown::extract_title(content),
        items: markdown::extract_timeline_items(content),
    };
    component("TimelineSlide", palette, &data, TIMELINE_STYLES, TIMELINE_MARKUP)
}

// ── Statistics ───────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct StatisticsData {
    title: String,
    stats: Vec<DataItem>,
}

const STATISTICS_STYLES: &str = r#"
const styles: Record<string, React.CSSProperties> = {
  root: { minHeight: '100vh', background: palette.gradient, color: palette.text, padding: '3rem 4rem' },
  title: { fontSize: '2.75rem', fontWeight: 700, textAlign: 'center', marginBottom: '3rem' },
  grid: { display: 'grid', gridTemplateColumns: 'repeat(auto-fit, minmax(14rem, 1fr))', gap: '2rem' },
  card: { background: palette.cardBackground, borderRadius: '1.25rem', padding: '2.5rem 1.5rem', textAlign: 'center' },
  value: { fontSize: '3.5rem', fontWeight: 800, color: palette.primary, lineHeight: 1 },
  label: { marginTop: '1rem', fontSize: '1.1rem', color: palette.secondary },
};
"#;

const STATISTICS_MARKUP: &str = r#"
    <div style={styles.root}>
      <h2 style={styles.title}>{slide.title}</h2>
      <div style={styles.grid}>
        {slide.stats.map((stat, i) => (
          <motion.div
            key={i}
            style={styles.card}
            initial={{ opacity: 0, scale: 0.6 }}
            animate={{ opacity: 1, scale: 1 }}
            transition={{ type: 'spring', delay: i * 0.15 }}
            whileHover={{ y: -8 }}
          >
            <div style={styles.value}>{stat.value}</div>
            <div style={styles.label}>{stat.label}</div>
          </motion.div>
        ))}
      </div>
    </div>"#;

pub(super) fn statistics(content: &str, palette: &Palette) -> String {
    let data = StatisticsData {
        title: markdown::extract_title(content),
        stats: markdown::extract_data_items(content),
    };
    component("StatisticsSlide", palette, &data, STATISTICS_STYLES, STATISTICS_MARKUP)
}

// ── List ─────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ListData {
    title: String,
    items: Vec<String>,
}

const LIST_STYLES: &str = r#"
const styles: Record<string, React.CSSProperties> = {
  root: { minHeight: '100vh', background: palette.background, color: palette.text, padding: '4rem 6rem' },
  title: { fontSize: '2.75rem', fontWeight: 700, marginBottom: '2.5rem', borderBottom: `3px solid ${palette.accent}`, paddingBottom: '1rem' },
  list: { listStyle: 'none', padding: 0, margin: 0 },
  item: { display: 'flex', alignItems: 'baseline', gap: '1.25rem', fontSize: '1.35rem', margin: '1.1rem 0' },
  number: { fontWeight: 800, fontSize: '1.6rem', color: palette.primary, minWidth: '2.5rem' },
};
"#;

const LIST_MARKUP: &str = r#"
    <div style={styles.root}>
      <h2 style={styles.title}>{slide.title}</h2>
      <ol style={styles.list}>
        {slide.items.map((item, i) => (
          <motion.li
            key={i}
            style={styles.item}
            initial={{ opacity: 0, x: 40 }}
            animate={{ opacity: 1, x: 0 }}
            transition={{ delay: i * 0.12 }}
          >
            <span style={styles.number}>{String(i + 1).padStart(2, '0')}</span>
            <span>{item}</span>
          </motion.li>
        ))}
      </ol>
    </div>"#;

pub(super) fn list(content: &str, palette: &Palette) -> String {
    let data = ListData {
        title: markdown::extract_title(content),
        items: markdown::extract_list_items(content),
    };
    component("ListSlide", palette, &data, LIST_STYLES, LIST_MARKUP)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::palette::DARK;

    #[test]
    fn title_uses_subheading_as_subtitle() {
        let code = title("# Чёрные дыры\n## Тайны вселенной\n* физика", &DARK);
        assert!(code.contains(r#""subtitle":"Тайны вселенной""#));
        assert!(code.contains(r#""tags":["физика"]"#));
    }

    #[test]
    fn comparison_uses_first_two_sections() {
        let code = comparison("# C\n## Rust\n* fast\n## Go\n* simple\n## Zig\n* new", &DARK);
        assert!(code.contains(r#""left":{"title":"Rust","points":["fast"]}"#));
        assert!(code.contains(r#""right":{"title":"Go","points":["simple"]}"#));
        assert!(!code.contains("Zig"));
    }

    #[test]
    fn statistics_fall_back_to_placeholder_figures() {
        let code = statistics("# Numbers", &DARK);
        assert!(code.contains("Рост эффективности"));
        assert!(code.contains("24/7"));
    }

    #[test]
    fn list_numbers_items() {
        let code = list("# L\n1. a\n2. b", &DARK);
        assert!(code.contains(r#""items":["a","b"]"#));
        assert!(code.contains("padStart"));
    }
}
