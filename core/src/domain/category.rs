//! Visual style for each spending category

use shared::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryStyle {
    /// Icon identifier from the line-icon set
    pub icon: &'static str,
    /// Background color token
    pub color: &'static str,
}

pub fn style_for(category: Category) -> CategoryStyle {
    let (icon, color) = match category {
        Category::Groceries => ("shopping-basket", "bg-mint"),
        Category::Dining => ("utensils", "bg-orange-500"),
        Category::Transport => ("car", "bg-blue-500"),
        Category::Shopping => ("shopping-bag", "bg-purple-500"),
        Category::Entertainment => ("film", "bg-pink-500"),
        Category::Travel => ("plane", "bg-indigo-500"),
        Category::Utilities => ("zap", "bg-yellow-500"),
        Category::Income => ("wallet", "bg-forest"),
        Category::Other => ("circle", "bg-slate-400"),
    };
    CategoryStyle { icon, color }
}
