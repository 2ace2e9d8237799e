use contracts::domain::a001_project::ProjectSummary;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListingState {
    // displayed results, server order
    pub items: Vec<ProjectSummary>,

    // pagination
    pub offset: usize,
    pub has_more: bool,

    // load flag
    pub loading: bool,
}

impl ListingState {
    /// Новая выборка (смена фильтров или кнопка "Tìm kiếm")
    pub fn replace(&mut self, items: Vec<ProjectSummary>, page_size: usize) {
        self.has_more = items.len() == page_size;
        self.offset = items.len();
        self.items = items;
    }

    /// "Xem thêm": дописать страницу в конец, не меняя порядок уже
    /// показанных элементов
    pub fn append(&mut self, items: Vec<ProjectSummary>, page_size: usize) {
        self.has_more = items.len() == page_size;
        self.offset += items.len();
        self.items.extend(items);
    }

    /// "Hiển thị tất cả": показать всё, дальнейшая подгрузка не нужна
    pub fn materialize_all(&mut self, items: Vec<ProjectSummary>) {
        self.offset = items.len();
        self.has_more = false;
        self.items = items;
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
