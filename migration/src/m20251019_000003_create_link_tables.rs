use sea_orm_migration::prelude::*;

use super::m20251019_000001_create_inventory_schema::{
    Authors, Collections, CompositeParts, Organisms, Parts, Tags,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    #[allow(clippy::too_many_lines)]
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PartTags::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(PartTags::PartId).uuid().not_null())
                    .col(ColumnDef::new(PartTags::TagId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(PartTags::PartId)
                            .col(PartTags::TagId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_part_tags_part_id")
                            .from(PartTags::Table, PartTags::PartId)
                            .to(Parts::Table, Parts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_part_tags_tag_id")
                            .from(PartTags::Table, PartTags::TagId)
                            .to(Tags::Table, Tags::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AuthorTags::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(AuthorTags::AuthorId).uuid().not_null())
                    .col(ColumnDef::new(AuthorTags::TagId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(AuthorTags::AuthorId)
                            .col(AuthorTags::TagId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_author_tags_author_id")
                            .from(AuthorTags::Table, AuthorTags::AuthorId)
                            .to(Authors::Table, Authors::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_author_tags_tag_id")
                            .from(AuthorTags::Table, AuthorTags::TagId)
                            .to(Tags::Table, Tags::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OrganismTags::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(OrganismTags::OrganismId).uuid().not_null())
                    .col(ColumnDef::new(OrganismTags::TagId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(OrganismTags::OrganismId)
                            .col(OrganismTags::TagId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_organism_tags_organism_id")
                            .from(OrganismTags::Table, OrganismTags::OrganismId)
                            .to(Organisms::Table, Organisms::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_organism_tags_tag_id")
                            .from(OrganismTags::Table, OrganismTags::TagId)
                            .to(Tags::Table, Tags::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CollectionTags::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(CollectionTags::CollectionId).uuid().not_null())
                    .col(ColumnDef::new(CollectionTags::TagId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(CollectionTags::CollectionId)
                            .col(CollectionTags::TagId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_collection_tags_collection_id")
                            .from(CollectionTags::Table, CollectionTags::CollectionId)
                            .to(Collections::Table, Collections::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_collection_tags_tag_id")
                            .from(CollectionTags::Table, CollectionTags::TagId)
                            .to(Tags::Table, Tags::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CollectionParts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(CollectionParts::CollectionId).uuid().not_null())
                    .col(ColumnDef::new(CollectionParts::PartId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(CollectionParts::CollectionId)
                            .col(CollectionParts::PartId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_collection_parts_collection_id")
                            .from(CollectionParts::Table, CollectionParts::CollectionId)
                            .to(Collections::Table, Collections::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_collection_parts_part_id")
                            .from(CollectionParts::Table, CollectionParts::PartId)
                            .to(Parts::Table, Parts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CompositePartParts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(CompositePartParts::CompositePartId).uuid().not_null())
                    .col(ColumnDef::new(CompositePartParts::PartId).uuid().not_null())
                    .col(ColumnDef::new(CompositePartParts::Position).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(CompositePartParts::CompositePartId)
                            .col(CompositePartParts::PartId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_composite_part_parts_composite_part_id")
                            .from(CompositePartParts::Table, CompositePartParts::CompositePartId)
                            .to(CompositeParts::Table, CompositeParts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_composite_part_parts_part_id")
                            .from(CompositePartParts::Table, CompositePartParts::PartId)
                            .to(Parts::Table, Parts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_composite_part_parts_position")
                    .table(CompositePartParts::Table)
                    .col(CompositePartParts::CompositePartId)
                    .col(CompositePartParts::Position)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CompositePartParts::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CollectionParts::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CollectionTags::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(OrganismTags::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AuthorTags::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PartTags::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum PartTags {
    Table,
    PartId,
    TagId,
}

#[derive(DeriveIden)]
enum AuthorTags {
    Table,
    AuthorId,
    TagId,
}

#[derive(DeriveIden)]
enum OrganismTags {
    Table,
    OrganismId,
    TagId,
}

#[derive(DeriveIden)]
enum CollectionTags {
    Table,
    CollectionId,
    TagId,
}

#[derive(DeriveIden)]
enum CollectionParts {
    Table,
    CollectionId,
    PartId,
}

#[derive(DeriveIden)]
enum CompositePartParts {
    Table,
    CompositePartId,
    PartId,
    Position,
}
