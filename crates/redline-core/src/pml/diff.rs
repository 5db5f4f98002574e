// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

//! PmlDiffEngine - Core comparison engine for PowerPoint presentations
//!
//! Provides detailed comparison of PresentationSignatures, generating PmlChange records.

use super::result::PmlComparisonResult;
use super::settings::PmlComparerSettings;
use super::shape_match::{PmlShapeMatchEngine, ShapeMatchType};
use super::slide_matching::{
    PmlSlideMatchEngine, PresentationSignature, ShapeSignature, SlideMatch, SlideMatchType,
    TextBodySignature,
};
use super::types::{PmlChange, PmlChangeType};

/// Helper to create PmlChange with required fields and None defaults for optional fields.
/// The `desc` arm is accepted for call-site readability but the textual description itself
/// is derived on demand via `PmlChange::get_description`, not stored on the record.
macro_rules! pml_change {
    (slide: $slide:expr, type: $typ:expr, desc: $desc:expr) => {{
        let _ = || -> String { $desc };
        PmlChange {
            slide_index: Some($slide),
            old_slide_index: None,
            shape_id: None,
            shape_name: None,
            change_type: $typ,
            old_value: None,
            new_value: None,
            new_x: None,
            new_y: None,
            new_cx: None,
            new_cy: None,
            old_x: None,
            old_y: None,
            old_cx: None,
            old_cy: None,
            text_changes: None,
            match_confidence: None,
        }
    }};
    (slide: $slide:expr, shape: $shape:expr, type: $typ:expr, desc: $desc:expr) => {{
        let _ = || -> String { $desc };
        PmlChange {
            slide_index: Some($slide),
            old_slide_index: None,
            shape_id: Some($shape),
            shape_name: None,
            change_type: $typ,
            old_value: None,
            new_value: None,
            new_x: None,
            new_y: None,
            new_cx: None,
            new_cy: None,
            old_x: None,
            old_y: None,
            old_cx: None,
            old_cy: None,
            text_changes: None,
            match_confidence: None,
        }
    }};
    (slide: $slide:expr, shape: $shape:expr, name: $name:expr, type: $typ:expr, desc: $desc:expr) => {{
        let _ = || -> String { $desc };
        PmlChange {
            slide_index: Some($slide),
            old_slide_index: None,
            shape_id: Some($shape),
            shape_name: Some($name),
            change_type: $typ,
            old_value: None,
            new_value: None,
            new_x: None,
            new_y: None,
            new_cx: None,
            new_cy: None,
            old_x: None,
            old_y: None,
            old_cx: None,
            old_cy: None,
            text_changes: None,
            match_confidence: None,
        }
    }};
}

// ==================================================================================
// Main Diff Engine
// ==================================================================================

/// Core comparison engine for PowerPoint presentations.
///
/// Compares two PresentationSignatures and produces a detailed PmlComparisonResult
/// with all detected changes.
///
/// # Algorithm
/// 1. Compare presentation-level properties (slide size, theme)
/// 2. Match slides using PmlSlideMatchEngine (multi-pass with LCS)
/// 3. For each matched slide pair, compare contents:
///    - Layout changes
///    - Background changes
///    - Notes changes
///    - Shape-level changes (using PmlShapeMatchEngine)
/// 4. For matched shapes, compare:
///    - Transform properties (position, size, rotation)
///    - Z-order
///    - Content (text, images, tables, charts)
///    - Text formatting
///
/// # Parity Notes
/// - Preserves all change detection heuristics
/// - Honors all PmlComparerSettings flags
pub struct PmlDiffEngine;

impl PmlDiffEngine {
    /// Compare two presentation signatures and produce a detailed comparison result.
    ///
    /// # Arguments
    /// - `sig1` - Original presentation signature
    /// - `sig2` - Modified presentation signature
    /// - `settings` - Comparison settings (controls what to compare)
    ///
    /// # Returns
    /// `PmlComparisonResult` with all detected changes
    pub fn compare(
        sig1: &PresentationSignature,
        sig2: &PresentationSignature,
        settings: &PmlComparerSettings,
    ) -> PmlComparisonResult {
        let mut result = PmlComparisonResult::new();

        // Compare presentation-level properties
        Self::compare_presentation_properties(sig1, sig2, settings, &mut result);

        // Match slides
        let slide_matches = PmlSlideMatchEngine::match_slides(sig1, sig2, settings);

        // Process slide matches
        for slide_match in &slide_matches {
            Self::process_slide_match(slide_match, settings, &mut result);
        }

        // Update result statistics
        Self::update_result_statistics(&mut result);

        result
    }

    /// Compare presentation-level properties (slide size, theme).
    fn compare_presentation_properties(
        sig1: &PresentationSignature,
        sig2: &PresentationSignature,
        _settings: &PmlComparerSettings,
        result: &mut PmlComparisonResult,
    ) {
        // Slide size change
        if sig1.slide_cx != sig2.slide_cx || sig1.slide_cy != sig2.slide_cy {
            result.changes.push(pml_change!(
                slide: 0,
                type: PmlChangeType::SlideSizeChanged,
                desc: format!(
                    "Slide size changed from {}x{} to {}x{}",
                    sig1.slide_cx, sig1.slide_cy, sig2.slide_cx, sig2.slide_cy
                )
            ));
        }

        // Theme change
        if sig1.theme_hash != sig2.theme_hash {
            result.changes.push(pml_change!(
                slide: 0,
                type: PmlChangeType::ThemeChanged,
                desc: "Presentation theme changed".to_string()
            ));
        }
    }

    /// Process a single slide match.
    fn process_slide_match(
        slide_match: &SlideMatch,
        settings: &PmlComparerSettings,
        result: &mut PmlComparisonResult,
    ) {
        match slide_match.match_type {
            SlideMatchType::Inserted => {
                if settings.compare_slide_structure {
                    result.changes.push(pml_change!(
                        slide: slide_match.new_index.unwrap_or(0),
                        type: PmlChangeType::SlideInserted,
                        desc: format!("Slide inserted at position {}", slide_match.new_index.unwrap_or(0))
                    ));
                }
            }
            SlideMatchType::Deleted => {
                if settings.compare_slide_structure {
                    result.changes.push(pml_change!(
                        slide: slide_match.old_index.unwrap_or(0),
                        type: PmlChangeType::SlideDeleted,
                        desc: format!("Slide deleted from position {}", slide_match.old_index.unwrap_or(0))
                    ));
                }
            }
            SlideMatchType::Matched => {
                // Check if slide was moved
                if settings.compare_slide_structure && slide_match.was_moved() {
                    result.changes.push(pml_change!(
                        slide: slide_match.new_index.unwrap_or(0),
                        type: PmlChangeType::SlideMoved,
                        desc: format!(
                            "Slide moved from position {} to {}",
                            slide_match.old_index.unwrap_or(0),
                            slide_match.new_index.unwrap_or(0)
                        )
                    ));
                }

                // Compare slide contents
                if let (Some(old_slide), Some(new_slide)) =
                    (&slide_match.old_slide, &slide_match.new_slide)
                {
                    let slide_index = slide_match.new_index.unwrap_or(0);
                    Self::compare_slide_contents(
                        old_slide,
                        new_slide,
                        slide_index,
                        settings,
                        result,
                    );
                }
            }
        }
    }

    /// Compare contents of two matched slides.
    fn compare_slide_contents(
        slide1: &super::slide_matching::SlideSignature,
        slide2: &super::slide_matching::SlideSignature,
        slide_index: usize,
        settings: &PmlComparerSettings,
        result: &mut PmlComparisonResult,
    ) {
        // Compare layout (use content hash, not relationship ID)
        if slide1.layout_hash != slide2.layout_hash {
            result.changes.push(pml_change!(
                slide: slide_index,
                type: PmlChangeType::SlideLayoutChanged,
                desc: "Slide layout changed".to_string()
            ));
        }

        // Compare background
        if slide1.background_hash != slide2.background_hash {
            result.changes.push(pml_change!(
                slide: slide_index,
                type: PmlChangeType::SlideBackgroundChanged,
                desc: "Slide background changed".to_string()
            ));
        }

        // Compare notes
        if settings.compare_notes && slide1.notes_text != slide2.notes_text {
            result.changes.push(pml_change!(
                slide: slide_index,
                type: PmlChangeType::SlideNotesChanged,
                desc: "Slide notes changed".to_string()
            ));
        }

        // Match and compare shapes
        if settings.compare_shape_structure {
            let shape_matches = PmlShapeMatchEngine::match_shapes(slide1, slide2, settings);

            for shape_match in &shape_matches {
                match shape_match.match_type {
                    ShapeMatchType::Inserted => {
                        if let Some(new_shape) = &shape_match.new_shape {
                            result.changes.push(pml_change!(
                                slide: slide_index,
                                shape: new_shape.id.to_string(),
                                name: new_shape.name.clone(),
                                type: PmlChangeType::ShapeInserted,
                                desc: format!("Shape '{}' inserted", new_shape.name)
                            ));
                        }
                    }
                    ShapeMatchType::Deleted => {
                        if let Some(old_shape) = &shape_match.old_shape {
                            result.changes.push(pml_change!(
                                slide: slide_index,
                                shape: old_shape.id.to_string(),
                                name: old_shape.name.clone(),
                                type: PmlChangeType::ShapeDeleted,
                                desc: format!("Shape '{}' deleted", old_shape.name)
                            ));
                        }
                    }
                    ShapeMatchType::Matched => {
                        if let (Some(old_shape), Some(new_shape)) =
                            (&shape_match.old_shape, &shape_match.new_shape)
                        {
                            Self::compare_matched_shapes(
                                old_shape,
                                new_shape,
                                slide_index,
                                settings,
                                result,
                            );
                        }
                    }
                }
            }
        }
    }

    /// Compare two matched shapes for detailed changes.
    fn compare_matched_shapes(
        shape1: &ShapeSignature,
        shape2: &ShapeSignature,
        slide_index: usize,
        settings: &PmlComparerSettings,
        result: &mut PmlComparisonResult,
    ) {
        // Transform changes
        if settings.compare_shape_transforms {
            if let (Some(t1), Some(t2)) = (&shape1.transform, &shape2.transform) {
                // Position change
                if !t1.is_near(t2, settings.position_tolerance) {
                    result.changes.push(pml_change!(
                        slide: slide_index,
                        shape: shape2.id.to_string(),
                        name: shape2.name.clone(),
                        type: PmlChangeType::ShapeMoved,
                        desc: format!(
                            "Shape '{}' moved from ({},{}) to ({},{})",
                            shape2.name, t1.x, t1.y, t2.x, t2.y
                        )
                    ));
                }

                // Size change
                if !t1.is_same_size(t2, settings.position_tolerance) {
                    result.changes.push(pml_change!(
                        slide: slide_index,
                        shape: shape2.id.to_string(),
                        name: shape2.name.clone(),
                        type: PmlChangeType::ShapeResized,
                        desc: format!(
                            "Shape '{}' resized from {}x{} to {}x{}",
                            shape2.name, t1.cx, t1.cy, t2.cx, t2.cy
                        )
                    ));
                }

                // Rotation change
                if t1.rotation != t2.rotation {
                    result.changes.push(pml_change!(
                        slide: slide_index,
                        shape: shape2.id.to_string(),
                        name: shape2.name.clone(),
                        type: PmlChangeType::ShapeRotated,
                        desc: format!(
                            "Shape '{}' rotated from {} to {}",
                            shape2.name, t1.rotation, t2.rotation
                        )
                    ));
                }
            }
        }

        // Z-order change
        if shape1.z_order != shape2.z_order {
            result.changes.push(pml_change!(
                slide: slide_index,
                shape: shape2.id.to_string(),
                name: shape2.name.clone(),
                type: PmlChangeType::ShapeZOrderChanged,
                desc: format!(
                    "Shape '{}' z-order changed from {} to {}",
                    shape2.name, shape1.z_order, shape2.z_order
                )
            ));
        }

        // Content changes based on type
        use super::slide_matching::PmlShapeType;
        match shape1.type_ {
            PmlShapeType::TextBox | PmlShapeType::AutoShape => {
                if settings.compare_text_content {
                    Self::compare_text_content(shape1, shape2, slide_index, settings, result);
                }
            }
            PmlShapeType::Picture => {
                if settings.compare_image_content && shape1.image_hash != shape2.image_hash {
                    result.changes.push(pml_change!(
                        slide: slide_index,
                        shape: shape2.id.to_string(),
                        name: shape2.name.clone(),
                        type: PmlChangeType::ImageReplaced,
                        desc: format!("Image in shape '{}' replaced", shape2.name)
                    ));
                }
            }
            PmlShapeType::Table => {
                if settings.compare_tables && shape1.table_hash != shape2.table_hash {
                    result.changes.push(pml_change!(
                        slide: slide_index,
                        shape: shape2.id.to_string(),
                        name: shape2.name.clone(),
                        type: PmlChangeType::TableContentChanged,
                        desc: format!("Table '{}' content changed", shape2.name)
                    ));
                }
            }
            PmlShapeType::Chart => {
                if settings.compare_charts && shape1.chart_hash != shape2.chart_hash {
                    result.changes.push(pml_change!(
                        slide: slide_index,
                        shape: shape2.id.to_string(),
                        name: shape2.name.clone(),
                        type: PmlChangeType::ChartDataChanged,
                        desc: format!("Chart '{}' data changed", shape2.name)
                    ));
                }
            }
            _ => {}
        }
    }

    /// Compare text content of two shapes.
    fn compare_text_content(
        shape1: &ShapeSignature,
        shape2: &ShapeSignature,
        slide_index: usize,
        settings: &PmlComparerSettings,
        result: &mut PmlComparisonResult,
    ) {
        let text1 = &shape1.text_body;
        let text2 = &shape2.text_body;

        // Both null - no change
        if text1.is_none() && text2.is_none() {
            return;
        }

        // One is null - text changed
        if text1.is_none() || text2.is_none() {
            result.changes.push(pml_change!(
                slide: slide_index,
                shape: shape2.id.to_string(),
                name: shape2.name.clone(),
                type: PmlChangeType::TextChanged,
                desc: format!("Text in shape '{}' changed", shape2.name)
            ));
            return;
        }

        let text1 = text1.as_ref().unwrap();
        let text2 = text2.as_ref().unwrap();

        // Compare plain text first
        if text1.plain_text != text2.plain_text {
            result.changes.push(pml_change!(
                slide: slide_index,
                shape: shape2.id.to_string(),
                name: shape2.name.clone(),
                type: PmlChangeType::TextChanged,
                desc: format!("Text in shape '{}' changed", shape2.name)
            ));
        } else if settings.compare_text_formatting {
            // Text is same, check formatting
            if Self::has_formatting_changes(text1, text2) {
                result.changes.push(pml_change!(
                    slide: slide_index,
                    shape: shape2.id.to_string(),
                    name: shape2.name.clone(),
                    type: PmlChangeType::TextFormattingChanged,
                    desc: format!("Text formatting in shape '{}' changed", shape2.name)
                ));
            }
        }
    }

    /// Check if two text bodies have formatting changes.
    fn has_formatting_changes(text1: &TextBodySignature, text2: &TextBodySignature) -> bool {
        if text1.paragraphs.len() != text2.paragraphs.len() {
            return true;
        }

        for (p1, p2) in text1.paragraphs.iter().zip(text2.paragraphs.iter()) {
            // Check paragraph properties
            if p1.alignment != p2.alignment || p1.has_bullet != p2.has_bullet {
                return true;
            }

            // Check run count
            if p1.runs.len() != p2.runs.len() {
                return true;
            }

            // Check run properties
            for (r1, r2) in p1.runs.iter().zip(p2.runs.iter()) {
                if r1.properties != r2.properties {
                    return true;
                }
            }
        }

        false
    }

    /// Update result statistics based on collected changes.
    fn update_result_statistics(result: &mut PmlComparisonResult) {
        result.total_changes = result.changes.len() as i32;

        for change in &result.changes {
            match change.change_type {
                PmlChangeType::SlideInserted => result.slides_inserted += 1,
                PmlChangeType::SlideDeleted => result.slides_deleted += 1,
                PmlChangeType::ShapeInserted => result.shapes_inserted += 1,
                PmlChangeType::ShapeDeleted => result.shapes_deleted += 1,
                PmlChangeType::ShapeMoved => result.shapes_moved += 1,
                PmlChangeType::ShapeResized => result.shapes_resized += 1,
                PmlChangeType::TextChanged | PmlChangeType::TextFormattingChanged => {
                    result.text_changes += 1
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::slide_matching::SlideSignature;
    use super::*;

    fn create_test_presentation(slide_count: usize) -> PresentationSignature {
        PresentationSignature {
            slide_cx: 9144000,
            slide_cy: 6858000,
            slides: (0..slide_count)
                .map(|i| SlideSignature {
                    index: i,
                    relationship_id: format!("rId{}", i + 1),
                    layout_relationship_id: None,
                    layout_hash: None,
                    shapes: vec![],
                    notes_text: None,
                    title_text: Some(format!("Slide {}", i + 1)),
                    content_hash: String::new(),
                    background_hash: None,
                })
                .collect(),
            theme_hash: Some("theme1".to_string()),
        }
    }

    #[test]
    fn test_identical_presentations() {
        let sig1 = create_test_presentation(3);
        let sig2 = create_test_presentation(3);
        let settings = PmlComparerSettings::default();

        let result = PmlDiffEngine::compare(&sig1, &sig2, &settings);

        assert_eq!(result.total_changes, 0);
        assert_eq!(result.changes.len(), 0);
    }

    #[test]
    fn test_slide_size_changed() {
        let mut sig1 = create_test_presentation(1);
        let mut sig2 = create_test_presentation(1);
        sig2.slide_cx = 10000000;

        let settings = PmlComparerSettings::default();
        let result = PmlDiffEngine::compare(&sig1, &sig2, &settings);

        assert!(result
            .changes
            .iter()
            .any(|c| c.change_type == PmlChangeType::SlideSizeChanged));
    }

    #[test]
    fn test_theme_changed() {
        let mut sig1 = create_test_presentation(1);
        let mut sig2 = create_test_presentation(1);
        sig2.theme_hash = Some("theme2".to_string());

        let settings = PmlComparerSettings::default();
        let result = PmlDiffEngine::compare(&sig1, &sig2, &settings);

        assert!(result
            .changes
            .iter()
            .any(|c| c.change_type == PmlChangeType::ThemeChanged));
    }

    #[test]
    fn test_slide_inserted() {
        let sig1 = create_test_presentation(2);
        let sig2 = create_test_presentation(3);

        let settings = PmlComparerSettings::default();
        let result = PmlDiffEngine::compare(&sig1, &sig2, &settings);

        assert_eq!(result.slides_inserted, 1);
        assert!(result
            .changes
            .iter()
            .any(|c| c.change_type == PmlChangeType::SlideInserted));
    }

    #[test]
    fn test_slide_deleted() {
        let sig1 = create_test_presentation(3);
        let sig2 = create_test_presentation(2);

        let settings = PmlComparerSettings::default();
        let result = PmlDiffEngine::compare(&sig1, &sig2, &settings);

        assert_eq!(result.slides_deleted, 1);
        assert!(result
            .changes
            .iter()
            .any(|c| c.change_type == PmlChangeType::SlideDeleted));
    }

    #[test]
    fn test_statistics_update() {
        let sig1 = create_test_presentation(2);
        let sig2 = create_test_presentation(3);

        let settings = PmlComparerSettings::default();
        let result = PmlDiffEngine::compare(&sig1, &sig2, &settings);

        assert_eq!(result.total_changes, result.changes.len() as i32);
        assert!(result.total_changes > 0);
    }
}
