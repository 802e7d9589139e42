//! Generic renderers selected by [`Layout`](crate::archetype::Layout) for
//! archetypes without a dedicated design.

use super::{component, points_of, subheading_of, Palette};
use crate::markdown;
use serde::Serialize;

#[derive(Serialize)]
struct TextData {
    title: String,
    subtitle: Option<String>,
    paragraphs: Vec<String>,
    points: Vec<String>,
}

impl TextData {
    fn from_markdown(content: &str) -> Self {
        Self {
            title: markdown::extract_title(content),
            subtitle: subheading_of(content),
            paragraphs: markdown::extract_paragraphs(content),
            points: points_of(content),
        }
    }
}

// ── Centered ─────────────────────────────────────────────────────────────────

const CENTERED_STYLES: &str = r#"
const styles: Record<string, React.CSSProperties> = {
  root: {
    minHeight: '100vh',
    display: 'flex',
    alignItems: 'center',
    justifyContent: 'center',
    background: palette.gradient,
    color: palette.text,
    padding: '4rem',
  },
  panel: { maxWidth: '52rem', textAlign: 'center' },
  title: { fontSize: '3.25rem', fontWeight: 700, color: palette.primary, marginBottom: '1.5rem' },
  lead: { fontSize: '1.3rem', lineHeight: 1.7, color: palette.secondary },
  points: { display: 'flex', flexDirection: 'column', gap: '0.85rem', marginTop: '2rem' },
  point: { fontSize: '1.2rem', padding: '0.85rem 1.5rem', borderRadius: '0.75rem', background: palette.cardBackground },
};
"#;

const CENTERED_MARKUP: &str = r#"
    <div style={styles.root}>
      <motion.div style={styles.panel} initial={{ opacity: 0, scale: 0.9 }} animate={{ opacity: 1, scale: 1 }}>
        <h2 style={styles.title}>{slide.title}</h2>
        {slide.paragraphs.slice(0, 2).map((text, i) => (
          <p key={i} style={styles.lead}>{text}</p>
        ))}
        <div style={styles.points}>
          {slide.points.map((point, i) => (
            <motion.div
              key={i}
              style={styles.point}
              initial={{ opacity: 0, y: 20 }}
              animate={{ opacity: 1, y: 0 }}
              transition={{ delay: 0.3 + i * 0.12 }}
            >
              {point}
            </motion.div>
          ))}
        </div>
      </motion.div>
    </div>"#;

pub(super) fn centered(content: &str, palette: &Palette) -> String {
    let data = TextData::from_markdown(content);
    component("CenteredSlide", palette, &data, CENTERED_STYLES, CENTERED_MARKUP)
}

// ── Two column ───────────────────────────────────────────────────────────────

const TWO_COLUMN_STYLES: &str = r#"
const styles: Record<string, React.CSSProperties> = {
  root: {
    minHeight: '100vh',
    display: 'grid',
    gridTemplateColumns: '1fr 1fr',
    gap: '4rem',
    alignItems: 'center',
    background: palette.background,
    color: palette.text,
    padding: '4rem 5rem',
  },
  title: { fontSize: '2.75rem', fontWeight: 700, color: palette.primary, marginBottom: '1rem' },
  subtitle: { fontSize: '1.35rem', color: palette.accent, marginBottom: '1.5rem' },
  text: { fontSize: '1.15rem', lineHeight: 1.7, color: palette.secondary },
  card: { background: palette.cardBackground, borderRadius: '1rem', padding: '2rem 2.5rem' },
  point: { fontSize: '1.15rem', margin: '1rem 0', paddingLeft: '1rem', borderLeft: `4px solid ${palette.primary}` },
};
"#;

const TWO_COLUMN_MARKUP: &str = r#"
    <div style={styles.root}>
      <motion.div initial={{ opacity: 0, x: -50 }} animate={{ opacity: 1, x: 0 }} transition={{ duration: 0.6 }}>
        <h2 style={styles.title}>{slide.title}</h2>
        {slide.subtitle && <h3 style={styles.subtitle}>{slide.subtitle}</h3>}
        {slide.paragraphs.map((text, i) => (
          <p key={i} style={styles.text}>{text}</p>
        ))}
      </motion.div>
      <motion.div
        style={styles.card}
        initial={{ opacity: 0, x: 50 }}
        animate={{ opacity: 1, x: 0 }}
        transition={{ duration: 0.6, delay: 0.2 }}
      >
        {slide.points.map((point, i) => (
          <div key={i} style={styles.point}>{point}</div>
        ))}
      </motion.div>
    </div>"#;

pub(super) fn two_column(content: &str, palette: &Palette) -> String {
    let data = TextData::from_markdown(content);
    component("TwoColumnSlide", palette, &data, TWO_COLUMN_STYLES, TWO_COLUMN_MARKUP)
}

// ── Grid ─────────────────────────────────────────────────────────────────────

const GRID_STYLES: &str = r#"
const styles: Record<string, React.CSSProperties> = {
  root: { minHeight: '100vh', background: palette.gradient, color: palette.text, padding: '3rem 4rem' },
  title: { fontSize: '2.75rem', fontWeight: 700, marginBottom: '0.75rem' },
  intro: { fontSize: '1.15rem', color: palette.secondary, marginBottom: '2.5rem', maxWidth: '60rem' },
  grid: { display: 'grid', gridTemplateColumns: 'repeat(2, 1fr)', gap: '1.5rem' },
  tile: {
    background: palette.cardBackground,
    borderRadius: '1rem',
    padding: '1.75rem',
    display: 'flex',
    gap: '1rem',
    alignItems: 'flex-start',
    boxShadow: '0 6px 20px rgba(0,0,0,0.06)',
  },
  badge: {
    flexShrink: 0,
    width: '2.5rem',
    height: '2.5rem',
    borderRadius: '0.75rem',
    background: palette.primary,
    color: palette.background,
    display: 'flex',
    alignItems: 'center',
    justifyContent: 'center',
    fontWeight: 700,
  },
};

const gridVariants = {
  hidden: {},
  show: { transition: { staggerChildren: 0.1 } },
};

const tileVariants = {
  hidden: { opacity: 0, y: 25 },
  show: { opacity: 1, y: 0 },
};
"#;

const GRID_MARKUP: &str = r#"
    <div style={styles.root}>
      <h2 style={styles.title}>{slide.title}</h2>
      {slide.paragraphs.length > 0 && <p style={styles.intro}>{slide.paragraphs[0]}</p>}
      <motion.div style={styles.grid} variants={gridVariants} initial="hidden" animate="show">
        {slide.points.map((point, i) => (
          <motion.div key={i} style={styles.tile} variants={tileVariants} whileHover={{ scale: 1.03 }}>
            <span style={styles.badge}>{i + 1}</span>
            <span>{point}</span>
          </motion.div>
        ))}
      </motion.div>
    </div>"#;

pub(super) fn grid(content: &str, palette: &Palette) -> String {
    let data = TextData::from_markdown(content);
    component("GridSlide", palette, &data, GRID_STYLES, GRID_MARKUP)
}

// ── Featured ─────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct FeaturedData {
    title: String,
    highlight: String,
    details: Vec<String>,
}

const FEATURED_STYLES: &str = r#"
const styles: Record<string, React.CSSProperties> = {
  root: { minHeight: '100vh', background: palette.background, color: palette.text, padding: '4rem 5rem' },
  title: { fontSize: '2.5rem', fontWeight: 700, color: palette.secondary, marginBottom: '2rem' },
  hero: {
    background: palette.primary,
    color: palette.background,
    borderRadius: '1.5rem',
    padding: '3rem',
    fontSize: '2rem',
    fontWeight: 600,
    lineHeight: 1.4,
    marginBottom: '2.5rem',
  },
  details: { display: 'flex', gap: '1.25rem', flexWrap: 'wrap' },
  detail: {
    flex: '1 1 16rem',
    background: palette.cardBackground,
    borderRadius: '1rem',
    padding: '1.25rem 1.5rem',
    borderBottom: `4px solid ${palette.accent}`,
  },
};
"#;

const FEATURED_MARKUP: &str = r#"
    <div style={styles.root}>
      <h2 style={styles.title}>{slide.title}</h2>
      <motion.div
        style={styles.hero}
        initial={{ opacity: 0, y: 40 }}
        animate={{ opacity: 1, y: 0 }}
        transition={{ type: 'spring', stiffness: 80 }}
      >
        {slide.highlight}
      </motion.div>
      <div style={styles.details}>
        {slide.details.map((detail, i) => (
          <motion.div
            key={i}
            style={styles.detail}
            initial={{ opacity: 0 }}
            animate={{ opacity: 1 }}
            transition={{ delay: 0.5 + i * 0.15 }}
          >
            {detail}
          </motion.div>
        ))}
      </div>
    </div>"#;

/// First paragraph (or first point) as the hero block, the rest as details.
pub(super) fn featured(content: &str, palette: &Palette) -> String {
    let paragraphs = markdown::extract_paragraphs(content);
    let mut points = points_of(content);
    let highlight = match paragraphs.first() {
        Some(p) => p.clone(),
        None if !points.is_empty() => points.remove(0),
        None => String::new(),
    };
    let data = FeaturedData {
        title: markdown::extract_title(content),
        highlight,
        details: points,
    };
    component("FeaturedSlide", palette, &data, FEATURED_STYLES, FEATURED_MARKUP)
}
